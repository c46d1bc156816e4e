//! Run metadata kept in the calendar description.
//!
//! ```xml
//! <schedgen version="0.2.0" updated="2018-03-05"/>
//! ```

use chrono::NaiveDate;
use quick_xml::Writer;
use quick_xml::events::{BytesStart, Event as XmlEvent};

use crate::error::{SchedGenError, SchedGenResult};

const ROOT: &str = "schedgen";
const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunMetadata {
    pub version: String,
    /// Day of the last completed run, `None` if the calendar was never filled.
    pub updated: Option<NaiveDate>,
}

impl RunMetadata {
    /// Metadata for this build, last run on `updated`.
    pub fn current(updated: Option<NaiveDate>) -> Self {
        RunMetadata {
            version: crate::VERSION.to_string(),
            updated,
        }
    }

    pub fn encode(&self) -> SchedGenResult<String> {
        let mut writer = Writer::new(Vec::new());

        let mut root = BytesStart::new(ROOT);
        root.push_attribute(("version", self.version.as_str()));
        if let Some(updated) = self.updated {
            let updated = updated.format(DATE_FORMAT).to_string();
            root.push_attribute(("updated", updated.as_str()));
        }

        writer
            .write_event(XmlEvent::Empty(root))
            .map_err(|e| SchedGenError::Metadata(e.to_string()))?;

        String::from_utf8(writer.into_inner()).map_err(|e| SchedGenError::Metadata(e.to_string()))
    }

    /// Lenient decode: anything that isn't our element yields `None`, and an
    /// unreadable `updated` date is dropped.
    pub fn decode(text: &str) -> Option<Self> {
        let doc = roxmltree::Document::parse(text.trim()).ok()?;
        let root = doc.root_element();

        if root.tag_name().name() != ROOT {
            return None;
        }

        let version = root.attribute("version")?.to_string();
        let updated = root
            .attribute("updated")
            .and_then(|d| NaiveDate::parse_from_str(d, DATE_FORMAT).ok());

        Some(RunMetadata { version, updated })
    }

    pub fn updated_on(&self, date: NaiveDate) -> bool {
        self.updated == Some(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_encode() {
        let meta = RunMetadata {
            version: "0.2.0".to_string(),
            updated: Some(date(2018, 3, 5)),
        };
        assert_eq!(
            meta.encode().unwrap(),
            r#"<schedgen version="0.2.0" updated="2018-03-05"/>"#
        );

        let fresh = RunMetadata {
            version: "0.2.0".to_string(),
            updated: None,
        };
        assert_eq!(fresh.encode().unwrap(), r#"<schedgen version="0.2.0"/>"#);
    }

    #[test]
    fn test_decode_what_we_encode() {
        let meta = RunMetadata::current(Some(date(2018, 3, 5)));
        assert_eq!(RunMetadata::decode(&meta.encode().unwrap()), Some(meta));
    }

    #[test]
    fn test_decode_is_lenient() {
        assert_eq!(RunMetadata::decode(""), None);
        assert_eq!(RunMetadata::decode("My school calendar"), None);
        assert_eq!(RunMetadata::decode(r#"<bmsaschedule version="1.4"/>"#), None);
        assert_eq!(RunMetadata::decode(r#"<schedgen updated="2018-03-05"/>"#), None);

        let bad_date = RunMetadata::decode(r#"<schedgen version="0.1.0" updated="someday"/>"#);
        assert_eq!(
            bad_date,
            Some(RunMetadata {
                version: "0.1.0".to_string(),
                updated: None
            })
        );
    }
}
