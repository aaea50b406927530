//! Party color assignment
//!
//! Colors come from a fixed qualitative palette, handed out in the order
//! parties first appear in the filtered rows and wrapping around when there
//! are more parties than colors.

use serde::Serialize;
use std::collections::HashMap;

use crate::config::Palette;
use crate::dataset::Record;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartyColor {
    pub party: String,
    pub color: String,
}

/// Party -> color for one filtered row set, in first-appearance order.
/// Rebuilt for every selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartyColors {
    order: Vec<PartyColor>,
    lookup: HashMap<String, usize>,
}

impl PartyColors {
    pub fn assign(rows: &[&Record], palette: &Palette) -> Self {
        let mut colors = PartyColors::default();
        if palette.0.is_empty() {
            return colors;
        }

        for row in rows {
            if colors.lookup.contains_key(&row.party_name) {
                continue;
            }
            let i = colors.order.len();
            colors.lookup.insert(row.party_name.clone(), i);
            colors.order.push(PartyColor {
                party: row.party_name.clone(),
                color: palette.0[i % palette.0.len()].clone(),
            });
        }
        colors
    }

    pub fn color_of(&self, party: &str) -> Option<&str> {
        self.lookup.get(party).map(|&i| self.order[i].color.as_str())
    }

    pub fn entries(&self) -> &[PartyColor] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures::{dataset, row};

    fn palette(colors: &[&str]) -> Palette {
        Palette(colors.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_first_appearance_and_wraparound() {
        let data = dataset(&[
            row("Italy", "PD", 2018, &[], None, None),
            row("Italy", "M5S", 2018, &[], None, None),
            row("Italy", "PD", 2013, &[], None, None),
            row("Italy", "Lega", 2018, &[], None, None),
        ]);
        let rows: Vec<&Record> = data.records().iter().collect();
        let colors = PartyColors::assign(&rows, &palette(&["red", "green"]));

        let parties: Vec<_> = colors.entries().iter().map(|p| p.party.as_str()).collect();
        assert_eq!(parties, vec!["PD", "M5S", "Lega"]);
        assert_eq!(colors.color_of("PD"), Some("red"));
        assert_eq!(colors.color_of("M5S"), Some("green"));
        assert_eq!(colors.color_of("Lega"), Some("red"));
        assert_eq!(colors.color_of("FI"), None);
    }

    #[test]
    fn test_assignment_is_repeatable() {
        let data = dataset(&[
            row("Japan", "LDP", 2017, &[], None, None),
            row("Japan", "CDP", 2017, &[], None, None),
        ]);
        let rows: Vec<&Record> = data.records().iter().collect();
        let palette = Palette::default();
        assert_eq!(PartyColors::assign(&rows, &palette), PartyColors::assign(&rows, &palette));
    }

    #[test]
    fn test_empty_inputs() {
        assert!(PartyColors::assign(&[], &Palette::default()).is_empty());
        let data = dataset(&[row("Japan", "LDP", 2017, &[], None, None)]);
        let rows: Vec<&Record> = data.records().iter().collect();
        assert!(PartyColors::assign(&rows, &palette(&[])).is_empty());
    }
}
