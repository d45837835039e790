//! Section-scoped squad roster extraction.
//!
//! Walks a parsed squads page in document order, tracking whether the
//! cursor is inside the target country's section, and turns each
//! recognized roster template into a [`RosterEntry`]. Malformed entries
//! (missing fields, unexpected age formats) are dropped without
//! interrupting the walk.

use wikiharvest_shared::{Result, RosterEntry, SectionScoping, WikiHarvestError};
use wikiharvest_wikitext::{Document, MarkupNode, Template};

/// Template names that carry one squad member each (exact match).
const ROSTER_TEMPLATES: [&str; 3] = [
    "National football squad player",
    "nat fs player",
    "nat fs g player",
];

/// Stream roster entries from the target section.
///
/// Lazy: nodes are visited and entries validated only as the iterator
/// is advanced, and malformed entries are filtered inline.
pub fn roster_entries<'a>(
    doc: &'a Document,
    target_section: &'a str,
    scoping: SectionScoping,
) -> impl Iterator<Item = RosterEntry> + 'a {
    let mut filter = SectionFilter::new(target_section, scoping);

    doc.nodes().iter().filter_map(move |node| match node {
        MarkupNode::Heading { level, title } => {
            filter.observe_heading(*level, title);
            None
        }
        MarkupNode::Template(template) if filter.active && is_roster_template(template) => {
            entry_from_template(template).ok()
        }
        _ => None,
    })
}

/// Collect the full roster for the target section.
pub fn extract_roster(
    doc: &Document,
    target_section: &str,
    scoping: SectionScoping,
) -> Vec<RosterEntry> {
    roster_entries(doc, target_section, scoping).collect()
}

fn is_roster_template(template: &Template) -> bool {
    ROSTER_TEMPLATES.contains(&template.name())
}

// ---------------------------------------------------------------------------
// Section filter
// ---------------------------------------------------------------------------

/// Tracks whether the walk is currently inside the target section.
///
/// A heading whose title contains the target (case-sensitive) opens the
/// section. Under [`SectionScoping::Flat`] any later titled heading
/// closes it; under [`SectionScoping::Nested`] only a heading at or
/// above the opening level does, so sub-headings like position groups
/// stay inside. Headings with empty titles never change state.
struct SectionFilter<'a> {
    target: &'a str,
    scoping: SectionScoping,
    active: bool,
    activation_level: usize,
}

impl<'a> SectionFilter<'a> {
    fn new(target: &'a str, scoping: SectionScoping) -> Self {
        Self {
            target,
            scoping,
            active: false,
            activation_level: 0,
        }
    }

    fn observe_heading(&mut self, level: usize, title: &str) {
        if title.contains(self.target) {
            self.active = true;
            self.activation_level = level;
        } else if self.active && !title.is_empty() {
            match self.scoping {
                SectionScoping::Flat => self.active = false,
                SectionScoping::Nested => {
                    if level <= self.activation_level {
                        self.active = false;
                    }
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Entry extraction
// ---------------------------------------------------------------------------

/// Build an entry from one roster template's `name` and `age` fields.
fn entry_from_template(template: &Template) -> Result<RosterEntry> {
    let raw_name = template
        .get("name")
        .ok_or(WikiHarvestError::MissingRosterField("name"))?;
    let raw_age = template
        .get("age")
        .ok_or(WikiHarvestError::MissingRosterField("age"))?;

    Ok(RosterEntry {
        name: clean_name(raw_name),
        age_years: age_from_field(raw_age)?,
    })
}

/// Strip link markup and trailing annotations from a name value.
///
/// Enclosing brackets are trimmed first, then the value is cut at the
/// first `(` (disambiguators, captain notes) and at any bracket left
/// over from partially trimmed link syntax.
fn clean_name(raw: &str) -> String {
    let stripped = raw.trim_matches(['[', ']']);
    let before_paren = stripped.split('(').next().unwrap_or(stripped);
    let before_bracket = before_paren.split(']').next().unwrap_or(before_paren);
    before_bracket.trim().to_string()
}

/// Compute completed years of age from an inline age template value.
///
/// The value carries six numeric fields in template order: reference
/// date (y, m, d) then birth date (y, m, d). Non-numeric segments such
/// as the template name or `df=y` flags are ignored; anything other
/// than exactly six remaining numbers rejects the field.
fn age_from_field(raw: &str) -> Result<i32> {
    let tokens: Vec<i32> = raw
        .trim_matches(['{', '}', ' '])
        .split('|')
        .filter(|tok| !tok.is_empty() && tok.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|tok| tok.parse().ok())
        .collect();

    let [ref_y, ref_m, ref_d, birth_y, birth_m, birth_d] = tokens[..] else {
        return Err(WikiHarvestError::MalformedAgeField {
            found: tokens.len(),
        });
    };

    // One year less when the birthday has not yet come around.
    let mut age = ref_y - birth_y;
    if (ref_m, ref_d) < (birth_m, birth_d) {
        age -= 1;
    }
    Ok(age)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikiharvest_wikitext::parse;

    fn entry_names(entries: &[RosterEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn age_counts_completed_years() {
        // Birthday already passed in the reference year
        let age = age_from_field("{{Age|2022|11|20|1993|2|18}}").expect("age");
        assert_eq!(age, 29);

        // Birthday not yet reached
        let age = age_from_field("{{Age|2022|1|10|1993|2|18}}").expect("age");
        assert_eq!(age, 28);

        // Same day counts as already had
        let age = age_from_field("{{Age|2022|2|18|1993|2|18}}").expect("age");
        assert_eq!(age, 29);
    }

    #[test]
    fn age_ignores_non_numeric_tokens() {
        let age = age_from_field("{{Birth date and age|2022|11|20|1987|6|24|df=y}}").expect("age");
        assert_eq!(age, 35);
    }

    #[test]
    fn age_rejects_wrong_token_count() {
        let err = age_from_field("{{Age|1987|6|24}}").unwrap_err();
        assert!(matches!(
            err,
            WikiHarvestError::MalformedAgeField { found: 3 }
        ));

        let err = age_from_field("plain text").unwrap_err();
        assert!(matches!(
            err,
            WikiHarvestError::MalformedAgeField { found: 0 }
        ));
    }

    #[test]
    fn name_cleanup_variants() {
        assert_eq!(clean_name("[[Lionel Messi]]"), "Lionel Messi");
        assert_eq!(
            clean_name("[[José Della Torre (footballer)|José Della Torre]]"),
            "José Della Torre"
        );
        assert_eq!(clean_name("[[Ubaldo Fillol]] (captain)"), "Ubaldo Fillol");
        assert_eq!(clean_name("Plain Name"), "Plain Name");
        // Piped links without a disambiguator keep the pipe; the
        // cleanup cuts at '(' and ']' only.
        assert_eq!(clean_name("[[Héctor Scarone|Scarone]]"), "Héctor Scarone|Scarone");
    }

    #[test]
    fn extracts_only_from_target_section() {
        let text = "\
== Argentina ==
{{nat fs player|no=1|name=[[Ubaldo Fillol]]|age={{Age|1978|6|1|1950|7|21}}}}
== Brazil ==
{{nat fs player|no=1|name=[[Leão]]|age={{Age|1978|6|1|1949|7|11}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);

        assert_eq!(entry_names(&entries), vec!["Ubaldo Fillol"]);
        assert_eq!(entries[0].age_years, 27);
    }

    #[test]
    fn flat_scoping_closes_on_any_titled_heading() {
        let text = "\
== Argentina ==
{{nat fs g player|no=1|name=[[A One]]|age={{Age|2022|11|20|1993|2|18}}}}
=== Goalkeepers ===
{{nat fs g player|no=12|name=[[A Two]]|age={{Age|2022|11|20|1990|1|1}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert_eq!(entry_names(&entries), vec!["A One"]);
    }

    #[test]
    fn nested_scoping_keeps_subheadings_inside() {
        let text = "\
== Argentina ==
=== Goalkeepers ===
{{nat fs g player|no=1|name=[[A One]]|age={{Age|2022|11|20|1993|2|18}}}}
=== Defenders ===
{{nat fs player|no=2|name=[[A Two]]|age={{Age|2022|11|20|1990|1|1}}}}
== Brazil ==
{{nat fs player|no=1|name=[[B One]]|age={{Age|2022|11|20|1991|3|3}}}}
";
        let doc = parse(text);

        let nested = extract_roster(&doc, "Argentina", SectionScoping::Nested);
        assert_eq!(entry_names(&nested), vec!["A One", "A Two"]);

        // The same document under flat scoping stops at the first
        // sub-heading.
        let flat = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert!(flat.is_empty());
    }

    #[test]
    fn empty_title_heading_does_not_close_section() {
        let text = "\
== Argentina ==
== ==
{{nat fs player|name=[[Still Inside]]|age={{Age|2022|11|20|1993|2|18}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert_eq!(entry_names(&entries), vec!["Still Inside"]);
    }

    #[test]
    fn templates_before_any_heading_are_ignored() {
        let text = "\
{{nat fs player|name=[[Too Early]]|age={{Age|2022|11|20|1993|2|18}}}}
== Argentina ==
{{nat fs player|name=[[In Section]]|age={{Age|2022|11|20|1993|2|18}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert_eq!(entry_names(&entries), vec!["In Section"]);
    }

    #[test]
    fn unrecognized_templates_are_ignored() {
        let text = "\
== Argentina ==
{{flagicon|ARG}}
{{Nat fs player|name=[[Wrong Case]]|age={{Age|2022|11|20|1993|2|18}}}}
{{nat fs player|name=[[Right One]]|age={{Age|2022|11|20|1993|2|18}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        // Template name matching is exact and case-sensitive.
        assert_eq!(entry_names(&entries), vec!["Right One"]);
    }

    #[test]
    fn malformed_entries_skip_without_stopping() {
        let text = "\
== Argentina ==
{{nat fs player|name=[[No Age]]}}
{{nat fs player|age={{Age|2022|11|20|1993|2|18}}}}
{{nat fs player|name=[[Short Age]]|age={{Age|1993|2|18}}}}
{{nat fs player|name=[[Good One]]|age={{Age|2022|11|20|1993|2|18}}}}
{{nat fs player|name=[[Good Two]]|age={{Age|2022|11|20|1990|12|1}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);

        assert_eq!(entry_names(&entries), vec!["Good One", "Good Two"]);
        assert_eq!(entries[0].age_years, 29);
        assert_eq!(entries[1].age_years, 31);
    }

    #[test]
    fn entries_keep_document_order() {
        let text = "\
== Argentina ==
{{nat fs g player|no=1|name=[[Keeper]]|age={{Age|1986|5|31|1955|6|2}}}}
{{nat fs player|no=2|name=[[Defender]]|age={{Age|1986|5|31|1960|1|1}}}}
{{nat fs player|no=10|name=[[Playmaker]]|age={{Age|1986|5|31|1960|10|30}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert_eq!(
            entry_names(&entries),
            vec!["Keeper", "Defender", "Playmaker"]
        );
    }

    #[test]
    fn iterator_is_lazy() {
        let text = "\
== Argentina ==
{{nat fs player|name=[[First]]|age={{Age|2022|11|20|1993|2|18}}}}
{{nat fs player|name=[[Second]]|age={{Age|2022|11|20|1993|2|18}}}}
";
        let doc = parse(text);
        let first = roster_entries(&doc, "Argentina", SectionScoping::Flat).next();
        assert_eq!(first.map(|e| e.name), Some("First".into()));
    }

    #[test]
    fn section_match_is_substring() {
        let text = "\
== Argentina squad ==
{{nat fs player|name=[[Inside]]|age={{Age|2022|11|20|1993|2|18}}}}
";
        let doc = parse(text);
        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert_eq!(entry_names(&entries), vec!["Inside"]);
    }

    #[test]
    fn squads_fixture_extracts_argentina() {
        let text = std::fs::read_to_string(
            std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("../../fixtures/wikitext/squads.wiki"),
        )
        .expect("read fixture");
        let doc = parse(&text);

        let entries = extract_roster(&doc, "Argentina", SectionScoping::Flat);
        assert_eq!(
            entry_names(&entries),
            vec!["Ubaldo Fillol", "Osvaldo Ardiles", "Mario Kempes"]
        );
        assert_eq!(entries[0].age_years, 27);

        // Same page, different target
        let brazil = extract_roster(&doc, "Brazil", SectionScoping::Flat);
        assert_eq!(entry_names(&brazil), vec!["Leão", "Zico"]);
    }
}
