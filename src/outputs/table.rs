//! Plain-text table rendering for the terminal.
//!
//! ```text
//! ----------------------------------------------------------
//! | Начало недели | Конец недели | Популярные слова        |
//! ----------------------------------------------------------
//! |   09/04/2018  |  15/04/2018  | голос, программирование |
//! ----------------------------------------------------------
//! ```
//!
//! All widths are counted in characters, not bytes.

use crate::models::{DISPLAY_DATE_FORMAT, RankedWeek};
use itertools::Itertools;

pub const HEADER: [&str; 3] = ["Начало недели", "Конец недели", "Популярные слова"];

const START_WIDTH: usize = 13;
const END_WIDTH: usize = 12;
const MIN_WORDS_WIDTH: usize = 16;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn padding(filler: char, n: usize) -> String {
    std::iter::repeat_n(filler, n).collect()
}

fn ljust(s: &str, width: usize, filler: char) -> String {
    let pad = width.saturating_sub(char_len(s));
    format!("{s}{}", padding(filler, pad))
}

fn rjust(s: &str, width: usize, filler: char) -> String {
    let pad = width.saturating_sub(char_len(s));
    format!("{}{s}", padding(filler, pad))
}

/// Centre `s`; when the margin is odd the extra filler goes left only if
/// `width` is odd too.
fn center(s: &str, width: usize, filler: char) -> String {
    let margin = width.saturating_sub(char_len(s));
    let left = margin / 2 + (margin & width & 1);
    format!(
        "{}{s}{}",
        padding(filler, left),
        padding(filler, margin - left)
    )
}

/// Lay out one table row.
///
/// The first two cells are centred, the third is left-aligned, and the
/// delimiter is padded out with `filler` on both sides.
pub fn format_line(source: [&str; 3], sizes: [usize; 3], delimiter: &str, filler: char) -> String {
    let inner = center(delimiter, 3, filler);
    format!(
        "{}{}{inner}{}{inner}{}{}",
        ljust(delimiter, 2, filler),
        center(source[0], sizes[0], filler),
        center(source[1], sizes[1], filler),
        ljust(source[2], sizes[2], filler),
        rjust(delimiter, 2, filler),
    )
}

/// Comma-joined lemmas of one week, most frequent first.
pub fn words_cell(week: &RankedWeek) -> String {
    week.nouns.iter().map(|n| n.lemma.as_str()).join(", ")
}

/// Width of the widest words cell.
pub fn max_words_len<S: AsRef<str>>(cells: &[S]) -> usize {
    cells
        .iter()
        .map(|c| char_len(c.as_ref()))
        .max()
        .unwrap_or(0)
}

/// Render the full report table, one row per week, ending with a newline.
pub fn render_table(weeks: &[RankedWeek]) -> String {
    let rows: Vec<(String, String, String)> = weeks
        .iter()
        .map(|w| {
            (
                w.week.start.format(DISPLAY_DATE_FORMAT).to_string(),
                w.week.end.format(DISPLAY_DATE_FORMAT).to_string(),
                words_cell(w),
            )
        })
        .collect();

    let words: Vec<&str> = rows.iter().map(|(_, _, w)| w.as_str()).collect();
    let sizes = [
        START_WIDTH,
        END_WIDTH,
        MIN_WORDS_WIDTH.max(max_words_len(&words)),
    ];
    let rule_cells = sizes.map(|n| padding('-', n));
    let rule = format_line(
        [rule_cells[0].as_str(), rule_cells[1].as_str(), rule_cells[2].as_str()],
        sizes,
        "-",
        '-',
    );

    let mut lines = vec![rule.clone(), format_line(HEADER, sizes, "|", ' '), rule.clone()];
    lines.extend(
        rows.iter()
            .map(|(start, end, words)| {
                format_line([start.as_str(), end.as_str(), words.as_str()], sizes, "|", ' ')
            }),
    );
    lines.push(rule);

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NounCount, WeekRange};
    use chrono::NaiveDate;

    fn week(d: u32, m: u32, y: i32, lemmas: &[&str]) -> RankedWeek {
        RankedWeek {
            week: WeekRange::containing(NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            nouns: lemmas.iter().map(|l| NounCount::new(*l, 1)).collect(),
        }
    }

    #[test]
    fn test_format_header_line() {
        assert_eq!(
            format_line(HEADER, [13, 12, 20], "|", ' '),
            "| Начало недели | Конец недели | Популярные слова     |"
        );
    }

    #[test]
    fn test_format_rule_line() {
        let line = format_line(["-----", "---", "----"], [5, 3, 4], "-", '-');
        assert_eq!(line, "-".repeat(2 + 5 + 3 + 3 + 3 + 4 + 2));
    }

    #[test]
    fn test_center_matches_odd_even_rule() {
        assert_eq!(center("09/04/2018", 13, ' '), "  09/04/2018 ");
        assert_eq!(center("09/04/2018", 12, ' '), " 09/04/2018 ");
        assert_eq!(center("ab", 5, '*'), "**ab*");
        assert_eq!(center("abc", 4, '*'), "abc*");
        assert_eq!(center("слишком длинно", 3, ' '), "слишком длинно");
    }

    #[test]
    fn test_max_words_len_counts_chars() {
        let cells = [
            "программирование, голос, основа",
            "Дайджест, материал, видео",
        ];
        assert_eq!(max_words_len(&cells), 31);
        assert_eq!(max_words_len::<&str>(&[]), 0);
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[week(12, 4, 2018, &["голос", "программирование"])]);
        let lines: Vec<&str> = table.lines().collect();

        let rule = "-".repeat(2 + 13 + 3 + 12 + 3 + 23 + 2);
        assert_eq!(
            lines,
            vec![
                rule.as_str(),
                "| Начало недели | Конец недели | Популярные слова        |",
                rule.as_str(),
                "|   09/04/2018  |  15/04/2018  | голос, программирование |",
                rule.as_str(),
            ]
        );
        assert!(table.ends_with('\n'));
    }

    #[test]
    fn test_render_table_minimum_width() {
        let table = render_table(&[week(12, 4, 2018, &["код"])]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[3], "|   09/04/2018  |  15/04/2018  | код              |");
    }

    #[test]
    fn test_render_empty_report_keeps_header() {
        let table = render_table(&[]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "| Начало недели | Конец недели | Популярные слова |");
    }
}
