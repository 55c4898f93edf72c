/*!
 * # Source/notation correlation
 *
 * Maps a cursor position in the markup to the `xml:id` of the element that
 * owns it, and an `xml:id` back to the position of its attribute.
 *
 * The markup is never parsed into a tree. The document may be malformed or
 * half-typed while the user edits, so every lookup works line by line with a
 * handful of patterns (see [`patterns`]) and degrades to `None` instead of
 * failing.
 *
 * Resolution for a cursor position:
 *
 * 1. If a closing tag (`</name>`) sits at or before the cursor column, the
 *    effective row becomes the nearest row above that opens `<name`.
 * 2. The first `xml:id` on the effective row wins.
 * 3. Otherwise walk upwards to the enclosing `<staff>` or `<measure>` and
 *    take its `xml:id`. Staffs that were closed on the way up belong to a
 *    sibling and are skipped. The walk never passes a `<measure>` opening or
 *    the `<music>` root.
 */

pub mod patterns;

use crate::text::{Position, TextView};

pub use patterns::count_staff_openings;

/// An `xml:id` and the position of its attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierSite {
    pub id: String,
    pub position: Position,
}

/// The identifier of the element owning `position`, if any.
pub fn identifier_at<T: TextView + ?Sized>(text: &T, position: Position) -> Option<String> {
    let line = text.line_at(position.row)?;
    let mut row = position.row;

    if let Some(tag) = closing_tag_before(&line, position.column)
        && let Some(opening_row) = (0..row).rev().find(|&r| {
            text.line_at(r)
                .is_some_and(|candidate| patterns::opens(&candidate, &tag))
        })
    {
        row = opening_row;
    }

    if let Some(id) = text
        .line_at(row)
        .and_then(|line| patterns::first_xml_id(&line).map(str::to_string))
    {
        return Some(id);
    }

    enclosing_identifier(text, row)
}

/// Position of the first `xml:id` attribute whose value equals `identifier`.
///
/// Values are compared as opaque strings. The column is that of the start of
/// the `xml:id` attribute.
pub fn position_of_identifier<T: TextView + ?Sized>(
    text: &T,
    identifier: &str,
) -> Option<Position> {
    (0..text.line_count()).find_map(|row| {
        let line = text.line_at(row)?;
        patterns::xml_ids(&line)
            .find(|(_, value)| *value == identifier)
            .map(|(offset, _)| Position {
                row,
                column: line[..offset].chars().count(),
            })
    })
}

/// Every `xml:id` in document order.
pub fn identifiers<T: TextView + ?Sized>(text: &T) -> Vec<IdentifierSite> {
    let mut sites = Vec::new();
    for row in 0..text.line_count() {
        let Some(line) = text.line_at(row) else {
            continue;
        };
        for (offset, value) in patterns::xml_ids(&line) {
            sites.push(IdentifierSite {
                id: value.to_string(),
                position: Position {
                    row,
                    column: line[..offset].chars().count(),
                },
            });
        }
    }
    sites
}

/// Step back from `column` looking for `</`; the name of the closing tag found
/// from there on.
fn closing_tag_before(line: &str, column: usize) -> Option<String> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let start = column.min(chars.len().checked_sub(1)?);

    (1..=start).rev().find_map(|j| {
        let (lt_offset, lt) = chars[j - 1];
        if lt == '<' && chars[j].1 == '/' {
            patterns::closing_tag_from(line, lt_offset).map(str::to_string)
        } else {
            None
        }
    })
}

fn enclosing_identifier<T: TextView + ?Sized>(text: &T, from_row: usize) -> Option<String> {
    let mut outside_enclosing_staff = false;

    for row in (0..=from_row).rev() {
        let Some(line) = text.line_at(row) else {
            continue;
        };

        if patterns::opens(&line, "music") {
            break;
        }

        if patterns::closes(&line, "staff") {
            outside_enclosing_staff = true;
            continue;
        }

        let is_measure = patterns::opens(&line, "measure");
        if is_measure || (patterns::opens(&line, "staff") && !outside_enclosing_staff) {
            if let Some(id) = patterns::first_xml_id(&line) {
                return Some(id.to_string());
            }
            if is_measure {
                break;
            }
        }
    }

    None
}
