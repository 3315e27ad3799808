use crate::constants::{
    COLUMN_SEPARATOR, COLUMN_SETTINGS_ATTR, COLUMN_TYPE_SEPARATOR, DATE_ATTR, DESCRIPTION_ATTR,
    FORMAT_ATTR, MAIL_ATTR, OWNER_ATTR, SITE_ATTR, VERSION_ATTR,
};
use crate::document::CatalogDocument;
use crate::types::{AttributeMap, CatalogInfo, Owner};

/// Reads catalog-level metadata from a loaded document
pub struct MetadataReader;

impl MetadataReader {
    pub fn read(doc: &CatalogDocument) -> CatalogInfo {
        let root = doc.root_attributes();
        let empty = AttributeMap::new();
        let properties = doc.properties().map(|p| &p.attributes).unwrap_or(&empty);

        let custom_fields_properties = doc
            .custom_fields_properties()
            .and_then(|node| node.attribute(COLUMN_SETTINGS_ATTR))
            .map(parse_column_settings)
            .unwrap_or_default();

        CatalogInfo {
            version: root.get_or_empty(VERSION_ATTR),
            format: root.get_or_empty(FORMAT_ATTR),
            date: root.get_or_empty(DATE_ATTR),
            owner: Owner {
                name: properties.get_or_empty(OWNER_ATTR),
                email: properties.get_or_empty(MAIL_ATTR),
                url: properties.get_or_empty(SITE_ATTR),
                description: properties.get_or_empty(DESCRIPTION_ATTR),
            },
            custom_fields_properties,
            movie_count: doc.movie_count(),
        }
    }
}

/// Declared custom field names from a `name1:type1,name2:type2` string.
/// Empty tokens are skipped.
pub fn parse_column_settings(settings: &str) -> Vec<String> {
    settings
        .split(COLUMN_SEPARATOR)
        .filter(|token| !token.is_empty())
        .filter_map(|token| token.split(COLUMN_TYPE_SEPARATOR).next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column_settings_skips_empty_tokens() {
        assert_eq!(
            parse_column_settings("Actors:Text,,Studio:Text"),
            vec!["Actors", "Studio"]
        );
    }

    #[test]
    fn test_parse_column_settings_edge_cases() {
        assert!(parse_column_settings("").is_empty());
        assert!(parse_column_settings(",,").is_empty());
        assert_eq!(parse_column_settings("Seen"), vec!["Seen"]);
        assert_eq!(parse_column_settings("A:Int:1,B:"), vec!["A", "B"]);
        assert_eq!(parse_column_settings(":Text"), vec![""]);
    }

    #[test]
    fn test_read_metadata() {
        let xml = r#"<AntMovieCatalog Version="4.2" Format="43" Date="2020-01-02">
  <Catalog>
    <Properties Owner="Jo" Mail="jo@example.com" Site="http://example.com" Description="Shelf"/>
    <CustomFieldsProperties ColumnSettings="Actors:Text,,Studio:Text"/>
    <Contents><Movie Number="1"/><Movie Number="2"/></Contents>
  </Catalog>
</AntMovieCatalog>"#;
        let doc = CatalogDocument::parse(xml.as_bytes(), "t").unwrap();
        let info = MetadataReader::read(&doc);

        assert_eq!(info.version, "4.2");
        assert_eq!(info.format, "43");
        assert_eq!(info.date, "2020-01-02");
        assert_eq!(info.owner.name, "Jo");
        assert_eq!(info.owner.email, "jo@example.com");
        assert_eq!(info.owner.url, "http://example.com");
        assert_eq!(info.owner.description, "Shelf");
        assert_eq!(info.custom_fields_properties, vec!["Actors", "Studio"]);
        assert_eq!(info.movie_count, 2);
    }

    #[test]
    fn test_read_metadata_without_optional_sections() {
        let xml = r#"<AntMovieCatalog><Catalog><Contents/></Catalog></AntMovieCatalog>"#;
        let doc = CatalogDocument::parse(xml.as_bytes(), "t").unwrap();
        let info = MetadataReader::read(&doc);

        assert_eq!(info, CatalogInfo::default());
    }
}
