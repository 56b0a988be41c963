//! Naive CSV-to-row parsing for the backlog feed.
//!
//! The feed is plain comma-separated text with a header line. There is
//! deliberately no dialect handling: no quoting, no escaping, no embedded
//! commas or newlines inside fields. A malformed line degrades into
//! empty/zero fields instead of failing the whole parse.

/// One data line of the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Zero-based position among parsed lines. Reassigned on every parse,
    /// so ids are not stable across reloads.
    pub id: usize,
    /// Organizational grouping the team belongs to.
    pub subgroup: String,
    pub team: String,
    /// Healthy Backlog Limit: the capacity ceiling configured for the team.
    pub hbl: i64,
    /// Current unassigned ticket count. Domain convention caps this at 25%
    /// of `hbl`; not validated here.
    pub unassigned: i64,
}

/// Parse feed text into rows.
///
/// The first line is always treated as a header and discarded, with no
/// header-name validation. Header-only, empty, or whitespace-only input
/// yields no rows. A line with fewer than 4 fields fills the missing
/// trailing fields with `""` / 0; fields beyond the fourth are ignored.
pub fn parse_rows(text: &str) -> Vec<Row> {
    text.trim()
        .lines()
        .skip(1)
        .enumerate()
        .map(|(id, line)| {
            let mut fields = line.split(',');
            let subgroup = fields.next().unwrap_or("").trim().to_string();
            let team = fields.next().unwrap_or("").trim().to_string();
            let hbl = parse_leading_int(fields.next().unwrap_or(""));
            let unassigned = parse_leading_int(fields.next().unwrap_or(""));
            Row {
                id,
                subgroup,
                team,
                hbl,
                unassigned,
            }
        })
        .collect()
}

/// Parse the leading base-10 integer of a string, defaulting to 0.
///
/// Skips leading whitespace, accepts an optional sign, then consumes digits
/// up to the first non-digit: `"12abc"` is 12, `"abc"` and `""` are 0.
pub fn parse_leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }
    // Out-of-range digit runs saturate rather than wrap.
    let value: i64 = digits[..end].parse().unwrap_or(i64::MAX);
    if negative {
        -value
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_only_yields_no_rows() {
        assert!(parse_rows("a,b,c,d\n").is_empty());
    }

    #[test]
    fn empty_and_whitespace_input_yield_no_rows() {
        assert!(parse_rows("").is_empty());
        assert!(parse_rows("   \n  \n").is_empty());
    }

    #[test]
    fn parses_data_lines_in_order_with_sequential_ids() {
        let text = "h1,h2,h3,h4\nTeamA,Sub1,50,10\nTeamB,Sub2,abc,\n";
        let rows = parse_rows(text);
        assert_eq!(
            rows,
            vec![
                Row {
                    id: 0,
                    subgroup: "TeamA".into(),
                    team: "Sub1".into(),
                    hbl: 50,
                    unassigned: 10,
                },
                Row {
                    id: 1,
                    subgroup: "TeamB".into(),
                    team: "Sub2".into(),
                    hbl: 0,
                    unassigned: 0,
                },
            ]
        );
    }

    #[test]
    fn row_count_matches_data_line_count() {
        let mut text = String::from("subgroup,team,hbl,unassigned\n");
        for i in 0..40 {
            text.push_str(&format!("g{i},t{i},{i},{}\n", i / 4));
        }
        let rows = parse_rows(&text);
        assert_eq!(rows.len(), 40);
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.id, i);
        }
    }

    #[test]
    fn missing_fields_default_to_empty_and_zero() {
        let rows = parse_rows("h\nonly-subgroup\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].subgroup, "only-subgroup");
        assert_eq!(rows[0].team, "");
        assert_eq!(rows[0].hbl, 0);
        assert_eq!(rows[0].unassigned, 0);
    }

    #[test]
    fn extra_fields_are_ignored() {
        let rows = parse_rows("h\nA,B,1,2,ignored,also-ignored\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].hbl, 1);
        assert_eq!(rows[0].unassigned, 2);
    }

    #[test]
    fn text_fields_are_trimmed() {
        let rows = parse_rows("h\n  Platform ,  Build Tools\t,5,1\n");
        assert_eq!(rows[0].subgroup, "Platform");
        assert_eq!(rows[0].team, "Build Tools");
    }

    #[test]
    fn parse_is_pure() {
        let text = "h1,h2,h3,h4\nA,B,1,2\nC,D,3,4\n";
        assert_eq!(parse_rows(text), parse_rows(text));
    }

    #[test]
    fn leading_int_semantics() {
        assert_eq!(parse_leading_int("12abc"), 12);
        assert_eq!(parse_leading_int("  42"), 42);
        assert_eq!(parse_leading_int("-7x"), -7);
        assert_eq!(parse_leading_int("+3"), 3);
        assert_eq!(parse_leading_int(""), 0);
        assert_eq!(parse_leading_int("abc"), 0);
        assert_eq!(parse_leading_int("3.9"), 3);
        assert_eq!(parse_leading_int("-"), 0);
    }
}
