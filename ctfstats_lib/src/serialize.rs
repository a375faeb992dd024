//! Renders a profile into the persisted JSON document.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::CtfStatsError;
use crate::model::Profile;

const INDENT: &[u8] = b" ";

/// Renders `profile` as pretty-printed JSON, one space per nesting level.
///
/// Absent season fields are left out, field order is fixed by the model, and
/// no trailing newline is written, so equal profiles give equal bytes.
pub fn to_json(profile: &Profile) -> Result<Vec<u8>, CtfStatsError> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    profile.serialize(&mut ser)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Ctf, Season};

    fn render(profile: &Profile) -> String {
        String::from_utf8(to_json(profile).unwrap()).unwrap()
    }

    #[test]
    fn empty_profile_keeps_seasons_key() {
        assert_eq!(render(&Profile::new()), "{\n \"seasons\": []\n}");
    }

    #[test]
    fn year_only_season() {
        let mut profile = Profile::new();
        profile.append(Season {
            year: Some(2021),
            ..Season::default()
        });
        let expected = "{\n \"seasons\": [\n  {\n   \"year\": 2021,\n   \"ctfs\": []\n  }\n ]\n}";
        assert_eq!(render(&profile), expected);
    }

    #[test]
    fn absent_fields_are_not_null() {
        let mut profile = Profile::new();
        profile.append(Season {
            points: Some(0.0),
            ..Season::default()
        });
        let value: serde_json::Value = serde_json::from_slice(&to_json(&profile).unwrap()).unwrap();
        let season = value["seasons"][0].as_object().unwrap();
        let mut keys: Vec<_> = season.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["ctfs", "points"]);
        assert_eq!(season["points"], serde_json::json!(0.0));
    }

    #[test]
    fn full_season_field_order() {
        let mut profile = Profile::new();
        let ctf = Ctf::new(1, "TeamAlpha", 100.0, 50.0);
        let id = ctf.id();
        profile.append(Season {
            year: Some(2021),
            place: Some(12),
            points: Some(345.5),
            country_place: Some(3),
            ctfs: vec![ctf],
        });
        let expected = format!(
            concat!(
                "{{\n",
                " \"seasons\": [\n",
                "  {{\n",
                "   \"year\": 2021,\n",
                "   \"place\": 12,\n",
                "   \"points\": 345.5,\n",
                "   \"countryPlace\": 3,\n",
                "   \"ctfs\": [\n",
                "    {{\n",
                "     \"id\": \"{}\",\n",
                "     \"place\": 1,\n",
                "     \"name\": \"TeamAlpha\",\n",
                "     \"points\": 100.0,\n",
                "     \"ratings\": 50.0\n",
                "    }}\n",
                "   ]\n",
                "  }}\n",
                " ]\n",
                "}}"
            ),
            id
        );
        assert_eq!(render(&profile), expected);
    }

    #[test]
    fn rendering_is_repeatable() {
        let mut profile = Profile::new();
        profile.append(Season {
            year: Some(2020),
            place: Some(40),
            ctfs: vec![Ctf::new(3, "x\"y", 1.25, 0.5)],
            ..Season::default()
        });
        assert_eq!(to_json(&profile).unwrap(), to_json(&profile).unwrap());
    }

    #[test]
    fn document_reads_back_into_equal_profile() {
        let mut profile = Profile::new();
        profile.append(Season {
            year: Some(2021),
            place: Some(12),
            points: Some(345.5),
            country_place: None,
            ctfs: vec![Ctf::new(1, "TeamAlpha", 100.0, 50.0), Ctf::new(2, "Beta", 0.5, 0.0)],
        });
        profile.append(Season::default());

        let back: Profile = serde_json::from_slice(&to_json(&profile).unwrap()).unwrap();
        assert_eq!(back, profile);
        assert_eq!(back.seasons()[0].ctfs[0].id(), profile.seasons()[0].ctfs[0].id());
    }
}
