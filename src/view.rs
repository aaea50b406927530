//! View model builder
//!
//! Turns one (country, dimension) selection into everything the presentation
//! layer draws: the per-party time series with legend colors, the explainer
//! panel text and the 3D economic/social/dimension scatter. Each call
//! recomputes from the dataset; nothing is cached between selections.

use serde::{Deserialize, Serialize};

use crate::classify::{classify_economic, classify_social, classify_with, Tiering};
use crate::config::{Palette, ViewConfig};
use crate::dataset::{most_recent_year, Dataset, Record};
use crate::dimension::{Dimension, DimensionInfo};
use crate::error::ScoreError;
use crate::palette::{PartyColor, PartyColors};

pub const TITLE: &str = "Exploring the Positions and Ideologies of Political Parties";
pub const SOURCE: &str = "Source: V-Party Dataset (https://www.v-dem.net/data/v-party-dataset/country-party-date-v2/)";
pub const CREDIT: &str = "Project By: Graham Diedrich";
pub const INTRO: [&str; 2] = [
    "This visualization presents time-series data of the ideological positions of major political \
     parties from 178 countries. The data is sourced from the V-Party dataset, which includes \
     assessments of party organization and identity as reflected by experts in political science. \
     The goal of this web-app is to allow political scientists and other policy professionals \
     insights into the relation between party positions and their ideologies, both contemporarily \
     and across time.",
    "Below, there are two interactive visuals. The first allows the user to view the political \
     positions for parties for a given country, based on a key issue. The scoring system can be \
     used to determine the meaning behind these position scores. The second visual outlines the \
     position score in relation to the parties ideological position on the social and economic \
     spectrum.",
];
pub const TAKEAWAYS_HEADING: &str = "Intended Takeaways";
pub const TAKEAWAYS_INTRO: &str = "Through the exploration of this database, users should ideally be able to:";
pub const TAKEAWAYS: [&str; 4] = [
    "Understand how political party positions are variable, changing across time.",
    "Compare political party positions within a given country.",
    "Explore trends in party positions as a result of a nation's political landscape.",
    "Examine how party ideological placement relates to policy positioning.",
];
pub const ECONOMIC_AXIS_TITLE: &str = "Economic Left-Right Scale";
pub const SOCIAL_AXIS_TITLE: &str = "Social Liberalism-Conservatism Scale";

/// Which rows feed the 3D scatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScatterScope {
    #[default]
    AllYears,
    /// Only the most recent year present for the country
    LatestYear,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewModel {
    pub country: String,
    pub dimension: DimensionInfo,
    pub text: PageText,
    /// Parties with at least one observation of the dimension
    pub legend: Vec<PartyColor>,
    pub series: Vec<PartySeries>,
    /// Horizontal axis bounds over every row of the country
    pub year_range: Option<YearRange>,
    pub scatter: Scatter,
}

impl ViewModel {
    /// True when the country has no rows at all
    pub fn is_empty(&self) -> bool {
        self.year_range.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PageText {
    pub title: &'static str,
    pub credit: &'static str,
    pub intro: [&'static str; 2],
    pub source: &'static str,
    pub series_heading: String,
    pub series_caption: String,
    pub scatter_heading: String,
    pub scatter_caption: String,
    pub takeaways_heading: &'static str,
    pub takeaways_intro: &'static str,
    pub takeaways: [&'static str; 4],
}

impl PageText {
    fn new(country: &str, dimension: Dimension) -> Self {
        let label = dimension.label();
        let lower = label.to_lowercase();
        Self {
            title: TITLE,
            credit: CREDIT,
            intro: INTRO,
            source: SOURCE,
            series_heading: format!("{} Scores for Parties in {}", label, country),
            series_caption: format!(
                "This line graph examines party positions related to {} across time. \
                 Use the question and coding panels to interpret the scores.",
                lower
            ),
            scatter_heading: format!("{} Scores on the Political Spectrum", label),
            scatter_caption: format!(
                "Compares a party's economic ideology, social ideology, and {} position. \
                 Hover over a point for the party and its classified positions.",
                lower
            ),
            takeaways_heading: TAKEAWAYS_HEADING,
            takeaways_intro: TAKEAWAYS_INTRO,
            takeaways: TAKEAWAYS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub score: f64,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PartySeries {
    pub party: String,
    pub color: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterAxes {
    pub x_title: &'static str,
    pub y_title: &'static str,
    pub z_title: &'static str,
    /// Economic axis runs right-to-left
    pub x_range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub party: String,
    pub color: String,
    pub year: i32,
    pub economic: f64,
    pub social: f64,
    pub score: f64,
    pub economic_position: &'static str,
    pub social_position: &'static str,
    pub position: &'static str,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Scatter {
    pub scope: ScatterScope,
    /// The year shown when scope is latest-year
    pub year: Option<i32>,
    pub axes: ScatterAxes,
    pub points: Vec<ScatterPoint>,
}

/// Build the view model for one selection.
///
/// An unknown country is not an error: it yields a model with no rows.
pub fn build(
    dataset: &Dataset,
    palette: &Palette,
    country: &str,
    dimension: Dimension,
    options: ViewConfig,
) -> Result<ViewModel, ScoreError> {
    let rows = dataset.rows_for_country(country);
    let colors = PartyColors::assign(&rows, palette);
    tracing::debug!(
        "Building view for {} / {}: {} rows, {} parties",
        country,
        dimension.id(),
        rows.len(),
        colors.len()
    );

    let series = time_series(&rows, &colors, dimension, options.tiering)?;
    let legend = series
        .iter()
        .map(|s| PartyColor { party: s.party.clone(), color: s.color.clone() })
        .collect();

    let year_range = match (rows.iter().map(|r| r.year).min(), most_recent_year(&rows)) {
        (Some(min), Some(max)) => Some(YearRange { min, max }),
        _ => None,
    };

    let scatter = scatter(&rows, &colors, dimension, options)?;

    Ok(ViewModel {
        country: country.to_string(),
        dimension: dimension.into(),
        text: PageText::new(country, dimension),
        legend,
        series,
        year_range,
        scatter,
    })
}

/// Per-party (year, score) sequences; parties without any observation of
/// `dimension` are dropped.
fn time_series(
    rows: &[&Record],
    colors: &PartyColors,
    dimension: Dimension,
    tiering: Tiering,
) -> Result<Vec<PartySeries>, ScoreError> {
    let mut series = Vec::new();
    for entry in colors.entries() {
        let points = rows
            .iter()
            .filter(|r| r.party_name == entry.party)
            .filter_map(|r| r.score(dimension).map(|score| (r.year, score)))
            .map(|(year, score)| -> Result<SeriesPoint, ScoreError> {
                Ok(SeriesPoint { year, score, label: classify_with(tiering, dimension, score)? })
            })
            .collect::<Result<Vec<_>, ScoreError>>()?;

        if points.is_empty() {
            tracing::trace!("Party '{}' has no {} observations", entry.party, dimension.id());
            continue;
        }
        series.push(PartySeries {
            party: entry.party.clone(),
            color: entry.color.clone(),
            points,
        });
    }
    Ok(series)
}

fn scatter(
    rows: &[&Record],
    colors: &PartyColors,
    dimension: Dimension,
    options: ViewConfig,
) -> Result<Scatter, ScoreError> {
    let year = match options.scatter_scope {
        ScatterScope::AllYears => None,
        ScatterScope::LatestYear => most_recent_year(rows),
    };

    let mut points = Vec::new();
    for row in rows.iter().filter(|r| year.map_or(true, |y| r.year == y)) {
        let (Some(economic), Some(social), Some(score)) =
            (row.economic, row.social, row.score(dimension))
        else {
            continue;
        };

        let economic_position = classify_economic(economic)?;
        let social_position = classify_social(social)?;
        let position = classify_with(options.tiering, dimension, score)?;
        let description = format!(
            "Party: {}\nEconomic Position: {}\nSocial Position: {}\n{}: {}",
            row.party_name,
            economic_position,
            social_position,
            dimension.label(),
            position
        );

        points.push(ScatterPoint {
            party: row.party_name.clone(),
            color: colors.color_of(&row.party_name).unwrap_or_default().to_string(),
            year: row.year,
            economic,
            social,
            score,
            economic_position,
            social_position,
            position,
            description,
        });
    }

    Ok(Scatter {
        scope: options.scatter_scope,
        year,
        axes: ScatterAxes {
            x_title: ECONOMIC_AXIS_TITLE,
            y_title: SOCIAL_AXIS_TITLE,
            z_title: dimension.label(),
            x_range: [6.0, 0.0],
        },
        points,
    })
}
