//! `package.xml` adapter.
//!
//! Only the targeted element is rewritten; the rest of the document is left
//! byte-for-byte as it was.

use std::fs;
use std::path::{Path, PathBuf};

use regex::{Captures, Regex};
use tracing::debug;

use strata_core::{
    application::{ApplicationError, ports::PackageDescriptor},
    domain::DescriptorField,
    error::{StrataError, StrataResult},
};

/// Default descriptor file name under the component root.
pub const PACKAGE_XML: &str = "package.xml";

/// Edits `<root>/package.xml` in place.
#[derive(Debug, Clone, Default)]
pub struct PackageXmlFile;

impl PackageXmlFile {
    pub fn new() -> Self {
        Self
    }

    fn path(root: &Path) -> PathBuf {
        root.join(PACKAGE_XML)
    }
}

fn descriptor_error(path: &Path, reason: impl Into<String>) -> StrataError {
    ApplicationError::Descriptor {
        path: path.to_path_buf(),
        reason: reason.into(),
    }
    .into()
}

/// Replace the text of the first `<child>` inside the first `<parent>`.
///
/// The search for `<child>` never leaves the parent element, so a
/// `<version>` without a `<release>` is an error rather than an edit to
/// the next `<release>` in the document.
fn set_element(xml: &str, field: DescriptorField, value: &str) -> Result<String, String> {
    let (parent, child) = field.element_path();
    let open = Regex::new(&format!(r"<{parent}(?:\s[^>]*)?>")).map_err(|e| e.to_string())?;
    let inner = Regex::new(&format!(r"(<{child}>)[^<]*(</{child}>)")).map_err(|e| e.to_string())?;

    let start = open
        .find(xml)
        .ok_or_else(|| format!("no <{parent}> element"))?
        .end();
    let end = xml[start..]
        .find(&format!("</{parent}>"))
        .map(|offset| start + offset)
        .ok_or_else(|| format!("<{parent}> is not closed"))?;

    let body = &xml[start..end];
    if !inner.is_match(body) {
        return Err(format!("no <{child}> inside <{parent}>"));
    }
    let body = inner.replacen(body, 1, |caps: &Captures| {
        format!("{}{}{}", &caps[1], value, &caps[2])
    });

    Ok(format!("{}{}{}", &xml[..start], body, &xml[end..]))
}

impl PackageDescriptor for PackageXmlFile {
    fn set_field(&self, root: &Path, field: DescriptorField, value: &str) -> StrataResult<()> {
        let path = Self::path(root);
        if !path.is_file() {
            return Err(descriptor_error(&path, "file not found"));
        }

        let xml = fs::read_to_string(&path).map_err(|e| descriptor_error(&path, e.to_string()))?;
        let updated = set_element(&xml, field, value).map_err(|e| descriptor_error(&path, e))?;
        fs::write(&path, updated).map_err(|e| descriptor_error(&path, e.to_string()))?;

        debug!(%field, value, "package.xml updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const XML: &str = r#"<package version="2.0">
 <version>
  <release>1.2.3</release>
  <api>1.0.0</api>
 </version>
 <stability>
  <release>beta</release>
  <api>stable</api>
 </stability>
</package>
"#;

    #[test]
    fn only_the_targeted_element_changes() {
        let out = set_element(XML, DescriptorField::ReleaseVersion, "${project.version}").unwrap();
        assert!(out.contains("<release>${project.version}</release>\n  <api>1.0.0</api>"));
        assert!(out.contains("<release>beta</release>"));
        assert_eq!(out.len(), XML.len() - "1.2.3".len() + "${project.version}".len());
    }

    #[test]
    fn stability_release_is_found_past_version() {
        let out =
            set_element(XML, DescriptorField::ReleaseStability, "${project.stability}").unwrap();
        assert!(out.contains("<release>1.2.3</release>"));
        assert!(out.contains("<release>${project.stability}</release>\n  <api>stable</api>"));
    }

    #[test]
    fn release_outside_the_parent_is_never_edited() {
        let xml = "<package>\n <version>\n  <api>1.0.0</api>\n </version>\n <stability>\n  <release>beta</release>\n </stability>\n</package>\n";
        let err = set_element(xml, DescriptorField::ReleaseVersion, "${project.version}").unwrap_err();
        assert!(err.contains("<version>"));
    }

    #[test]
    fn attributes_on_the_parent_are_kept() {
        let xml = "<stability kind=\"pear\"><release>alpha</release></stability>";
        let out = set_element(xml, DescriptorField::ReleaseStability, "beta").unwrap();
        assert_eq!(out, "<stability kind=\"pear\"><release>beta</release></stability>");
    }

    #[test]
    fn missing_element_or_file_is_an_error() {
        assert!(set_element("<package/>", DescriptorField::ReleaseVersion, "x").is_err());

        let tmp = TempDir::new().unwrap();
        let err = PackageXmlFile::new()
            .set_field(tmp.path(), DescriptorField::ReleaseVersion, "x")
            .unwrap_err();
        assert!(err.to_string().contains("package.xml"));
    }
}
