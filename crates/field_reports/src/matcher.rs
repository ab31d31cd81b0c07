use planner::Site;

use crate::intent::{RegionRef, extract_region_ref};

// single letters ("K", "G") would match almost any message
const MIN_TOKEN_LEN: usize = 2;

/// Naive site lookup by free text.
///
/// A site matches when the part of its label before `" - "` appears in the
/// text, or when any word of its label does. Sites are tried in order and the
/// first match wins.
pub fn find_site_by_text<'a>(text: &str, sites: &'a [Site]) -> Option<&'a Site> {
    let t = text.to_lowercase();
    sites.iter().find(|site| {
        let label = site.label.to_lowercase();
        let prefix = label.split(" - ").next().unwrap_or_default().trim();
        if !prefix.is_empty() && t.contains(prefix) {
            return true;
        }
        label
            .split(|c: char| !c.is_alphanumeric())
            .filter(|tok| tok.len() >= MIN_TOKEN_LEN)
            .any(|tok| t.contains(tok))
    })
}

/// Site named by a region reference: id `5`, id `ward-5`, or a label that
/// itself reads "Ward 5"
pub fn resolve_region<'a>(region: &RegionRef, sites: &'a [Site]) -> Option<&'a Site> {
    let number = region.number.to_string();
    let slug = format!("{}-{}", region.keyword, region.number);
    sites.iter().find(|site| {
        site.id == number
            || site.id.eq_ignore_ascii_case(&slug)
            || extract_region_ref(&site.label).as_ref() == Some(region)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner::mock_assets;

    #[test]
    fn test_match_by_label_prefix() {
        let sites = mock_assets();
        let site = find_site_by_text("the rain garden is overflowing", &sites).unwrap();
        assert_eq!(site.id, "A-002");
    }

    #[test]
    fn test_match_by_token() {
        let sites = mock_assets();
        let site = find_site_by_text("water pooling near city hall", &sites).unwrap();
        assert_eq!(site.id, "A-004");
    }

    #[test]
    fn test_first_site_wins() {
        let sites = mock_assets();
        // "5th" belongs to A-001 which comes first
        let site = find_site_by_text("flooding on 5th street by the swale", &sites).unwrap();
        assert_eq!(site.id, "A-001");
    }

    #[test]
    fn test_no_match() {
        let sites = mock_assets();
        assert!(find_site_by_text("a puddle somewhere", &sites).is_none());
    }

    #[test]
    fn test_resolve_region() {
        let sites = vec![
            Site::new("ward-5", "Ward 5", 77),
            Site::new("3", "Neighborhood Three", 40),
            Site::new("x", "Neighborhood 7", 20),
            Site::new("y", "Ward 50", 20),
        ];
        let r = |keyword, number| RegionRef { keyword, number };

        assert_eq!(resolve_region(&r("ward", 5), &sites).unwrap().id, "ward-5");
        assert_eq!(resolve_region(&r("neighborhood", 3), &sites).unwrap().id, "3");
        assert_eq!(resolve_region(&r("neighborhood", 7), &sites).unwrap().id, "x");
        assert_eq!(resolve_region(&r("ward", 50), &sites).unwrap().id, "y");
        assert!(resolve_region(&r("ward", 9), &sites).is_none());
    }
}
