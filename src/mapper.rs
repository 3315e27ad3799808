use crate::constants::{
    CUSTOM_FIELDS_TAG, EXTRAS_TAG, EXTRA_TAG, FORMATTED_TITLE_ATTR, NUMBER_ATTR,
    ORIGINAL_TITLE_ATTR,
};
use crate::document::XmlNode;
use crate::types::{AttributeMap, Movie, MovieLite};

/// Maps movie elements to records
pub struct MovieMapper;

impl MovieMapper {
    /// Copy a node's attributes, in enumeration order, with no coercion
    pub fn map_attributes(node: &XmlNode) -> AttributeMap {
        node.attributes.clone()
    }

    /// Build a full record from a `Movie` element.
    ///
    /// Only the first `CustomFields` child and the first `Extras` child are
    /// read; further duplicates are ignored. Either may be absent.
    pub fn map_movie(node: &XmlNode) -> Movie {
        let fields = Self::map_attributes(node);

        let custom_fields = node
            .first_child(CUSTOM_FIELDS_TAG)
            .map(Self::map_attributes)
            .unwrap_or_default();

        let extras: Vec<AttributeMap> = node
            .first_child(EXTRAS_TAG)
            .map(|extras| {
                extras
                    .children_named(EXTRA_TAG)
                    .map(Self::map_attributes)
                    .collect()
            })
            .unwrap_or_default();

        Movie {
            fields,
            custom_fields,
            extras,
        }
    }

    /// Build the three-field listing record straight off the element's attributes
    pub fn map_movie_lite(node: &XmlNode) -> MovieLite {
        MovieLite {
            number: node.attributes.get_or_empty(NUMBER_ATTR),
            formatted_title: node.attributes.get_or_empty(FORMATTED_TITLE_ATTR),
            original_title: node.attributes.get_or_empty(ORIGINAL_TITLE_ATTR),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_movie() -> XmlNode {
        XmlNode::new("Movie")
            .with_attr("Number", "1")
            .with_attr("FormattedTitle", "Foo")
            .with_attr("OriginalTitle", "Foo")
            .with_child(XmlNode::new("CustomFields").with_attr("Rating", "5"))
            .with_child(
                XmlNode::new("Extras").with_child(XmlNode::new("Extra").with_attr("Type", "Trailer")),
            )
    }

    #[test]
    fn test_map_attributes_empty_node() {
        assert!(MovieMapper::map_attributes(&XmlNode::new("Movie")).is_empty());
    }

    #[test]
    fn test_map_movie_full_shape() {
        let movie = MovieMapper::map_movie(&sample_movie());
        assert_eq!(
            movie.to_json(),
            json!({
                "Number": "1",
                "FormattedTitle": "Foo",
                "OriginalTitle": "Foo",
                "CustomFields": {"Rating": "5"},
                "Extras": [{"Type": "Trailer"}]
            })
        );
    }

    #[test]
    fn test_map_movie_without_optional_children() {
        let movie = MovieMapper::map_movie(&XmlNode::new("Movie").with_attr("Number", "3"));
        assert_eq!(movie.number(), Some("3"));
        assert!(movie.custom_fields.is_empty());
        assert!(movie.extras.is_empty());
    }

    #[test]
    fn test_map_movie_empty_extras_and_custom_fields() {
        let node = XmlNode::new("Movie")
            .with_child(XmlNode::new("CustomFields"))
            .with_child(XmlNode::new("Extras"));
        let movie = MovieMapper::map_movie(&node);
        assert!(movie.custom_fields.is_empty());
        assert!(movie.extras.is_empty());
    }

    #[test]
    fn test_map_movie_uses_first_duplicate_only() {
        let node = XmlNode::new("Movie")
            .with_child(XmlNode::new("CustomFields").with_attr("A", "first"))
            .with_child(XmlNode::new("CustomFields").with_attr("A", "second"))
            .with_child(
                XmlNode::new("Extras")
                    .with_child(XmlNode::new("Extra").with_attr("Tag", "x1"))
                    .with_child(XmlNode::new("Other"))
                    .with_child(XmlNode::new("Extra").with_attr("Tag", "x2")),
            )
            .with_child(
                XmlNode::new("Extras").with_child(XmlNode::new("Extra").with_attr("Tag", "y")),
            );

        let movie = MovieMapper::map_movie(&node);
        assert_eq!(movie.custom_fields.get("A"), Some("first"));
        let tags: Vec<_> = movie.extras.iter().filter_map(|e| e.get("Tag")).collect();
        assert_eq!(tags, vec!["x1", "x2"]);
    }

    #[test]
    fn test_map_movie_lite_ignores_nested() {
        let lite = MovieMapper::map_movie_lite(&sample_movie());
        assert_eq!(lite.number, "1");
        assert_eq!(lite.formatted_title, "Foo");
        assert_eq!(lite.original_title, "Foo");
        assert_eq!(lite, MovieLite::from(&MovieMapper::map_movie(&sample_movie())));
    }

    #[test]
    fn test_map_movie_lite_missing_attributes() {
        let lite = MovieMapper::map_movie_lite(&XmlNode::new("Movie"));
        assert_eq!(lite, MovieLite::default());
    }
}
