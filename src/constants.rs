//! Element and attribute names used by the catalog XML format.
//! Kept in one place so the mapper, metadata reader and tests agree on spelling.

// Structural elements
pub const CATALOG_TAG: &str = "Catalog";
pub const CONTENTS_TAG: &str = "Contents";
pub const PROPERTIES_TAG: &str = "Properties";
pub const CUSTOM_FIELDS_PROPERTIES_TAG: &str = "CustomFieldsProperties";
pub const MOVIE_TAG: &str = "Movie";
pub const CUSTOM_FIELDS_TAG: &str = "CustomFields";
pub const EXTRAS_TAG: &str = "Extras";
pub const EXTRA_TAG: &str = "Extra";

// Root attributes
pub const VERSION_ATTR: &str = "Version";
pub const FORMAT_ATTR: &str = "Format";
pub const DATE_ATTR: &str = "Date";

// Properties attributes
pub const OWNER_ATTR: &str = "Owner";
pub const MAIL_ATTR: &str = "Mail";
pub const SITE_ATTR: &str = "Site";
pub const DESCRIPTION_ATTR: &str = "Description";

// CustomFieldsProperties attribute: "name1:type1,name2:type2,..."
pub const COLUMN_SETTINGS_ATTR: &str = "ColumnSettings";
pub const COLUMN_SEPARATOR: char = ',';
pub const COLUMN_TYPE_SEPARATOR: char = ':';

// Movie attributes read by lite listings
pub const NUMBER_ATTR: &str = "Number";
pub const FORMATTED_TITLE_ATTR: &str = "FormattedTitle";
pub const ORIGINAL_TITLE_ATTR: &str = "OriginalTitle";

/// Source name used for catalogs loaded from memory rather than a file
pub const MEMORY_SOURCE_NAME: &str = "<memory>";

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "amc.toml";
