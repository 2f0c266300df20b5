use std::path::{Path, PathBuf};

/// Schema accepting exactly one empty `<b/>` root element
pub const REQUIRES_B_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:element name="b">
        <xs:complexType/>
    </xs:element>
</xs:schema>"#;

/// Schema whose own DOCTYPE points at an external DTD; loading it needs insecure mode
pub const EXTERNAL_DTD_SCHEMA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE xs:schema SYSTEM "types.dtd">
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema">
    <xs:element name="b">
        <xs:complexType/>
    </xs:element>
</xs:schema>"#;

pub const EXTERNAL_DTD: &str = r#"<!ENTITY vendor "xsd-schema-validator">"#;

pub const VALID_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><b/>"#;

pub const INVALID_XML: &str = r#"<?xml version="1.0"?><a/>"#;

/// Write `contents` to `dir/name`, creating parent directories
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
