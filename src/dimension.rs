//! Ideological dimensions - one static table keyed by identifier
//!
//! Each entry carries the display label, the expert-survey question, the four
//! short labels the classifier returns and the five published coding tiers.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// One published coding tier: a short headline and the full wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coding {
    pub headline: &'static str,
    pub description: &'static str,
}

/// Static metadata for a dimension
#[derive(Debug)]
pub struct DimensionSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub question: &'static str,
    /// Labels for score bands <1, <2, <3, >=3
    pub tier_labels: [&'static str; 4],
    /// Published tiers 0..=4
    pub coding: [Coding; 5],
}

const fn c(headline: &'static str, description: &'static str) -> Coding {
    Coding { headline, description }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum Dimension {
    AntiElitism,
    PeopleCentrism,
    PoliticalOpponents,
    PoliticalPluralism,
    MinorityRights,
    PoliticalViolence,
    Immigration,
    LgbtEquality,
    CulturalSuperiority,
    ReligiousPrinciples,
    GenderEquality,
    WorkingWomen,
}

impl Dimension {
    pub const ALL: [Dimension; 12] = [
        Dimension::AntiElitism,
        Dimension::PeopleCentrism,
        Dimension::PoliticalOpponents,
        Dimension::PoliticalPluralism,
        Dimension::MinorityRights,
        Dimension::PoliticalViolence,
        Dimension::Immigration,
        Dimension::LgbtEquality,
        Dimension::CulturalSuperiority,
        Dimension::ReligiousPrinciples,
        Dimension::GenderEquality,
        Dimension::WorkingWomen,
    ];

    pub fn spec(self) -> &'static DimensionSpec {
        &DIMENSIONS[self as usize]
    }

    /// Stable identifier, matching the undecorated dataset column
    pub fn id(self) -> &'static str {
        self.spec().id
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn question(self) -> &'static str {
        self.spec().question
    }

    /// Kebab-case form of the label, e.g. "lgbt-social-equality"
    pub fn slug(self) -> String {
        self.label()
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_lowercase() } else { '-' })
            .collect()
    }

    /// Coding legend lines as shown in the explainer panel
    pub fn coding_lines(self) -> Vec<String> {
        self.spec()
            .coding
            .iter()
            .enumerate()
            .map(|(tier, coding)| {
                if coding.description.is_empty() {
                    format!("{}: {}.", tier, coding.headline)
                } else {
                    format!("{}: {}. {}", tier, coding.headline, coding.description)
                }
            })
            .collect()
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown dimension '{0}'")]
pub struct UnknownDimension(pub String);

impl FromStr for Dimension {
    type Err = UnknownDimension;

    /// Accepts the identifier (optionally with a column suffix such as
    /// `_osp`), the label in any case, or its slug.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Dimension::ALL
            .into_iter()
            .find(|d| {
                let id = d.id();
                needle == id
                    || needle.strip_prefix(id).is_some_and(|rest| rest.starts_with('_'))
                    || needle.eq_ignore_ascii_case(d.label())
                    || needle.eq_ignore_ascii_case(&d.slug())
            })
            .ok_or_else(|| UnknownDimension(s.to_string()))
    }
}

impl TryFrom<String> for Dimension {
    type Error = UnknownDimension;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Indexed by `Dimension as usize`; order must match the enum.
static DIMENSIONS: [DimensionSpec; 12] = [
    DimensionSpec {
        id: "v2paanteli",
        label: "Anti-Elitism",
        question: "How important is anti-elite rhetoric for this party?",
        tier_labels: [
            "Rhetoric not important.",
            "Rhetoric somewhat important.",
            "Rhetoric important.",
            "Rhetoric very important.",
        ],
        coding: [
            c("Not at all important", "The leadership of this party never makes statements against the elite."),
            c("Not important", "The leadership of this party rarely makes statements against the elite."),
            c("Somewhat important", "The leadership of this party sometimes makes statements against the elite."),
            c("Important", "The leadership of this party often makes statements against the elite."),
            c("Very important", "The leadership of this party makes statements against the elite whenever possible."),
        ],
    },
    DimensionSpec {
        id: "v2papeople",
        label: "People-Centrism",
        question: "Do leaders of this party glorify the ordinary people and identify themselves as part of them?",
        tier_labels: [
            "Never centers ordinary people.",
            "Doesn't usually center ordinary people.",
            "Usually centers ordinary people.",
            "Always centers ordinary people.",
        ],
        coding: [
            c("Never", "The party leadership never glorifies and identifies with the ordinary people."),
            c("Usually not", "The party leadership generally does not glorify and identify with the ordinary people."),
            c("About half of the time", "The party leadership sometimes glorifies and identifies with the ordinary people."),
            c("Usually", "The party leadership generally glorifies and identifies with the ordinary people, which they claim to represent."),
            c("Always", "The party leadership always glorifies and identifies with the ordinary people, which they claim to represent."),
        ],
    },
    DimensionSpec {
        id: "v2paopresp",
        label: "Political Opponents",
        question: "Prior to this election, have leaders of this party used severe personal attacks or tactics of demonization against their opponents?",
        tier_labels: [
            "Always attacks opponents.",
            "Usually attacks opponents.",
            "Doesn't usually attack opponents.",
            "Never attacks opponents.",
        ],
        coding: [
            c("Always", "Party leaders always used severe personal attacks or tactics of demonization against their opponents."),
            c("Usually", "Party leaders usually used severe personal attacks or tactics of demonization against their opponents."),
            c("About half of the time", "Party leaders sometimes used severe personal attacks or tactics of demonization against their opponents."),
            c("Usually not", "Party leaders usually did not use severe personal attacks or tactics of demonization against their opponents."),
            c("Never", "Party leaders never used severe personal attacks or tactics of demonization against their opponents."),
        ],
    },
    DimensionSpec {
        id: "v2paplur",
        label: "Political Pluralism",
        question: "Prior to this election, to what extent was the leadership of this political party clearly committed to free and fair elections with multiple parties, freedom of speech, media, assembly and association?",
        tier_labels: [
            "Not at all committed.",
            "Weakly committed.",
            "Committed.",
            "Fully committed.",
        ],
        coding: [
            c("Not at all committed", "The party leadership was not at all committed to free and fair, multi-party elections, freedom of speech, media, assembly and association."),
            c("Not committed", "The party leadership was not committed to free and fair, multi-party elections, freedom of speech, media, assembly and association."),
            c("Weakly committed", "The party leadership was weakly committed to free and fair, multi-party elections, freedom of speech, media, assembly and association."),
            c("Committed", "The party leadership was committed to free and fair, multi-party elections, freedom of speech, media, assembly and association."),
            c("Fully committed", "The party leadership was fully committed to free and fair, multi-party elections, freedom of speech, media, assembly and association."),
        ],
    },
    DimensionSpec {
        id: "v2paminor",
        label: "Minority Rights",
        question: "According to the leadership of this party, how often should the will of the majority be implemented even if doing so would violate the rights of minorities?",
        tier_labels: [
            "Always against minority rights.",
            "Usually against minority rights.",
            "Usually supports minority rights.",
            "Always supports minority rights.",
        ],
        coding: [
            c("Always", "The leadership of this party argues that the will of the majority should always determine policy even if such policy violates minority rights."),
            c("Usually", "The leadership of this party argues that the will of the majority should usually determine policy even if such policy violates minority rights."),
            c("Half of the time", "The leadership of this party argues that the will of the majority should about half of the time determine policy even if such policy violate minority rights."),
            c("Usually not", "The leadership of this party argues that the will of the majority should usually not determine policy if such policy violates minority rights."),
            c("Never", "The leadership of this party argues that the will of the majority should never determine policy if such policy violates minority rights."),
        ],
    },
    DimensionSpec {
        id: "v2paviol",
        label: "Rejection of Political Violence",
        question: "To what extent does the leadership of this party explicitly discourage the use of violence against domestic political opponents?",
        tier_labels: [
            "Encourages violence.",
            "Sometimes encourages violence.",
            "Generally discourages violence.",
            "Always discourages violence.",
        ],
        coding: [
            c("Encourages", "Leaders of this party often encourage the use of violence against domestic political opponents."),
            c("Sometimes encourages", "Leaders of this party sometimes encourage the use of violence against domestic political opponents and generally refrain from discouraging it."),
            c("Discourages about half of the time", "Leaders of this party occasionally discourage the use of violence against domestic political opponents, and do not encourage it."),
            c("Generally discourages", "Leaders of this party often discourage the use of violence against its domestic political opponents."),
            c("Consistently discourages", "Leaders of this party consistently reject the use of violence against its domestic political opponents."),
        ],
    },
    DimensionSpec {
        id: "v2paimmig",
        label: "Immigration",
        question: "What is the party's position regarding immigration into the country?",
        tier_labels: ["Strongly opposes.", "Opposes.", "Supports.", "Strongly supports."],
        coding: [
            c("Strongly opposes", "This party strongly opposes all or almost all forms of immigration into the country."),
            c("Opposes", "This party opposes most forms of immigration into the country."),
            c("Ambiguous/No position", "This party has no clear policy with regard to immigration into the country."),
            c("Supports", "This party supports most forms of immigration into the country."),
            c("Strongly supports", "This party strongly supports all or almost all forms of immigration into the country."),
        ],
    },
    DimensionSpec {
        id: "v2palgbt",
        label: "LGBT Social Equality",
        question: "What is this party's position toward social equality for the lesbian, gay, bisexual, and transgender (LGBT) community?",
        tier_labels: ["Strongly opposes.", "Opposes.", "Supports.", "Strongly supports."],
        coding: [
            c("Strongly opposes", "This party is strongly opposed to LGBT social equality."),
            c("Opposes", "This party is opposed to LGBT social equality."),
            c("Ambiguous/No position", "This party has no clear policy with regard to LGBT social equality."),
            c("Supports", "This party supports LGBT social equality."),
            c("Strongly supports", "This party strongly supports LGBT social equality."),
        ],
    },
    DimensionSpec {
        id: "v2paculsup",
        label: "Cultural Superiority",
        question: "To what extent does the party leadership promote the cultural superiority of a specific social group or the nation as a whole?",
        tier_labels: ["Strongly promotes.", "Promotes.", "Opposes.", "Strongly opposes."],
        coding: [
            c("Strongly promotes", "The party strongly promotes the cultural superiority of a specific social group or the nation as a whole."),
            c("Promotes", "The party promotes the cultural superiority of a specific social group or the nation as a whole."),
            c("Ambiguous", "The party does not take a specific position on the cultural superiority of a specific social group or the nation as a whole."),
            c("Opposes", "The party opposes the promotion of the cultural superiority of a specific social group or the nation as a whole."),
            c("Strongly opposes", "The party strongly opposes the promotion of the cultural superiority of a specific social group or the nation as a whole."),
        ],
    },
    DimensionSpec {
        id: "v2parelig",
        label: "Religious Principles",
        question: "To what extent does this party invoke God, religion, or sacred/religious texts to justify its positions?",
        tier_labels: ["Always invokes.", "Often invokes.", "Rarely invokes.", "Never invokes."],
        coding: [
            c("Always, or almost always", "The party almost always invokes God, religion, or sacred/religious texts to justify its positions."),
            c("Often, but not always", "The party often, but not always, invokes God, religion, or religious texts to justify its positions."),
            c("About half of the time", "The party about half of the time invokes God, religion, or religious texts to justify its positions."),
            c("Rarely", "The party rarely invokes God, religion, or religious texts to justify its positions."),
            c("Never", "The party never invokes God, religion, or religious texts to justify its positions."),
        ],
    },
    DimensionSpec {
        id: "v2pagender",
        label: "Gender Equality",
        question: "What is the share of women in national-level leadership positions of this political party?",
        tier_labels: ["None.", "Small minority.", "Large minority.", "Balanced."],
        coding: [
            c("None", ""),
            c("Small minority (about 1-15%)", ""),
            c("Medium minority (about 16-25%)", ""),
            c("Large minority (about 26-39%)", ""),
            c("Balanced (about 40% or more)", ""),
        ],
    },
    DimensionSpec {
        id: "v2pawomlab",
        label: "Working Women",
        question: "To what extent does this party support the equal participation of women in the labor market?",
        tier_labels: ["Strongly opposes.", "Opposes.", "Supports.", "Strongly supports."],
        coding: [
            c("Strongly opposes", "This party strongly opposes all or almost all types of measures that support the equal participation of women in the labor market."),
            c("Opposes", "This party opposes most types of measures that support the equal participation of women in the labor market."),
            c("Ambiguous/No position", "This party has no clear policy with regard to measures that support the equal participation of women in the labor market."),
            c("Supports", "This party supports most types of measures that support the equal participation of women in the labor market."),
            c("Strongly supports", "This party strongly supports all or almost all types of measures that support the equal participation of women in the labor market."),
        ],
    },
];

/// Serializable dimension metadata for listings and the explainer panel
#[derive(Debug, Clone, Serialize)]
pub struct DimensionInfo {
    pub id: &'static str,
    pub slug: String,
    pub label: &'static str,
    pub question: &'static str,
    pub coding: Vec<String>,
}

impl From<Dimension> for DimensionInfo {
    fn from(d: Dimension) -> Self {
        Self {
            id: d.id(),
            slug: d.slug(),
            label: d.label(),
            question: d.question(),
            coding: d.coding_lines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_enum() {
        for (i, d) in Dimension::ALL.iter().enumerate() {
            assert_eq!(*d as usize, i);
            assert!(d.id().starts_with("v2pa"), "{} has unexpected id", d.id());
        }
    }

    #[test]
    fn test_ids_unique() {
        let mut ids: Vec<_> = Dimension::ALL.iter().map(|d| d.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn test_parse_variants() {
        assert_eq!("v2paanteli".parse::<Dimension>().unwrap(), Dimension::AntiElitism);
        assert_eq!("v2paanteli_osp".parse::<Dimension>().unwrap(), Dimension::AntiElitism);
        assert_eq!("anti-elitism".parse::<Dimension>().unwrap(), Dimension::AntiElitism);
        assert_eq!("LGBT Social Equality".parse::<Dimension>().unwrap(), Dimension::LgbtEquality);
        assert_eq!(
            "rejection-of-political-violence".parse::<Dimension>().unwrap(),
            Dimension::PoliticalViolence
        );
        assert!("v2paantelix".parse::<Dimension>().is_err());
        assert!("".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_coding_lines() {
        let lines = Dimension::AntiElitism.coding_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[4],
            "4: Very important. The leadership of this party makes statements against the elite whenever possible."
        );
        assert_eq!(Dimension::GenderEquality.coding_lines()[0], "0: None.");
    }

    #[test]
    fn test_serializes_as_id() {
        let json = serde_json::to_string(&Dimension::Immigration).unwrap();
        assert_eq!(json, "\"v2paimmig\"");
        let back: Dimension = serde_json::from_str("\"immigration\"").unwrap();
        assert_eq!(back, Dimension::Immigration);
    }
}
