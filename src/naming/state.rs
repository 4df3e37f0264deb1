//! AP style state abbreviations.

/// Postal code to AP style. Alaska, Hawaii, Idaho, Iowa, Maine, Ohio, Texas
/// and Utah are never abbreviated.
const AP_STATE: &[(&str, &str)] = &[
    ("AL", "Ala."),
    ("AZ", "Ariz."),
    ("AR", "Ark."),
    ("CA", "Calif."),
    ("CO", "Colo."),
    ("CT", "Conn."),
    ("DE", "Del."),
    ("FL", "Fla."),
    ("GA", "Ga."),
    ("IL", "Ill."),
    ("IN", "Ind."),
    ("KS", "Kan."),
    ("KY", "Ky."),
    ("LA", "La."),
    ("MD", "Md."),
    ("MA", "Mass."),
    ("MI", "Mich."),
    ("MN", "Minn."),
    ("MS", "Miss."),
    ("MO", "Mo."),
    ("MT", "Mont."),
    ("NE", "Neb."),
    ("NV", "Nev."),
    ("NH", "N.H."),
    ("NJ", "N.J."),
    ("NM", "N.M."),
    ("NY", "N.Y."),
    ("NC", "N.C."),
    ("ND", "N.D."),
    ("OK", "Okla."),
    ("OR", "Ore."),
    ("PA", "Pa."),
    ("RI", "R.I."),
    ("SC", "S.C."),
    ("SD", "S.D."),
    ("TN", "Tenn."),
    ("VT", "Vt."),
    ("VA", "Va."),
    ("WA", "Wash."),
    ("WV", "W.Va."),
    ("WI", "Wis."),
    ("WY", "Wyo."),
    ("DC", "D.C."),
    ("AK", "Alaska"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IA", "Iowa"),
    ("ME", "Maine"),
    ("OH", "Ohio"),
    ("TX", "Texas"),
    ("UT", "Utah"),
];

/// AP style name for a 2-letter postal code (e.g. "CA" -> "Calif.").
///
/// Empty input gives an empty string; an unknown code comes back trimmed and
/// uppercased.
pub fn ap_state(code: &str) -> String {
    let key = code.trim().to_uppercase();
    AP_STATE
        .iter()
        .find(|(postal, _)| *postal == key)
        .map(|(_, ap)| ap.to_string())
        .unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviated() {
        assert_eq!(ap_state("CA"), "Calif.");
        assert_eq!(ap_state("LA"), "La.");
        assert_eq!(ap_state("WV"), "W.Va.");
        assert_eq!(ap_state("DC"), "D.C.");
    }

    #[test]
    fn test_never_abbreviated() {
        for (code, full) in [
            ("AK", "Alaska"),
            ("HI", "Hawaii"),
            ("ID", "Idaho"),
            ("IA", "Iowa"),
            ("ME", "Maine"),
            ("OH", "Ohio"),
            ("TX", "Texas"),
            ("UT", "Utah"),
        ] {
            assert_eq!(ap_state(code), full);
        }
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(ap_state("fl"), "Fla.");
        assert_eq!(ap_state(" ny "), "N.Y.");
    }

    #[test]
    fn test_empty_and_unknown() {
        assert_eq!(ap_state(""), "");
        assert_eq!(ap_state("   "), "");
        assert_eq!(ap_state("zz"), "ZZ");
        assert_eq!(ap_state("PR"), "PR");
    }

    #[test]
    fn test_table_covers_states_and_dc() {
        assert_eq!(AP_STATE.len(), 51);
    }
}
