//! Device-name matching between the playback engine's device strings and
//! the platform's device list.
//!
//! The two sides rarely agree verbatim: drivers append suffixes and the
//! engine prepends qualifiers, so a name matches when the shorter string
//! occurs anywhere inside the longer one.

/// Windowed substring match, symmetric in its arguments.
pub fn device_names_match(a: &str, b: &str) -> bool {
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    longer.contains(shorter)
}

/// Pick the device to open for an engine-reported name: the first matching
/// entry, or the first enumerated device when nothing matches (so generic
/// engine names still map onto the default hardware). `None` only when the
/// list itself is empty.
pub fn match_or_first<'a>(engine_name: &str, names: &'a [String]) -> Option<&'a str> {
    names
        .iter()
        .find(|candidate| device_names_match(engine_name, candidate))
        .or_else(|| names.first())
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_names_match() {
        assert!(device_names_match("Speakers", "Speakers"));
    }

    #[test]
    fn shorter_inside_longer_matches_either_way() {
        assert!(device_names_match("Generic Software on Speakers (Realtek)", "Speakers (Realtek)"));
        assert!(device_names_match("Speakers (Realtek)", "Generic Software on Speakers (Realtek)"));
    }

    #[test]
    fn disjoint_names_do_not_match() {
        assert!(!device_names_match("Speakers (Realtek)", "USB Headset"));
    }

    #[test]
    fn match_or_first_prefers_a_match() {
        let names = vec!["USB Headset".to_string(), "Speakers (Realtek)".to_string()];
        assert_eq!(
            match_or_first("Generic Hardware on Speakers (Realtek)", &names),
            Some("Speakers (Realtek)")
        );
    }

    #[test]
    fn match_or_first_falls_back_to_first_device() {
        let names = vec!["USB Headset".to_string(), "Speakers (Realtek)".to_string()];
        assert_eq!(match_or_first("OpenAL Soft", &names), Some("USB Headset"));
        assert_eq!(match_or_first("anything", &[]), None);
    }
}
