//! Report Module
//! Builds the figures and printed summary for a cleaned survey table.

use crate::charts::{
    AxisTick, BoxGroup, BoxPlotChart, ChartRenderer, Figure, OverlayLine, Palette, PieChart,
};
use crate::data::{
    CategoryMapping, CleanedTable, DataCleaner, EXERCISE_FREQUENCY_MAPPING, FITNESS_LEVEL_MAPPING,
};
use crate::settings::{AgeAlignment, AnalysisSettings};
use crate::stats::{FrequencySummary, StatsCalculator};
use polars::prelude::DataFrame;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, error, info, warn};

pub const EXERCISE_FITNESS_TITLE: &str =
    "Relationship Between Exercise Frequency and Perceived Fitness Level";
pub const FITNESS_PIE_TITLE: &str = "Distribution of Fitness Levels";
pub const EXERCISE_PIE_TITLE: &str = "Distribution of Exercise Frequency";
pub const AGE_FITNESS_TITLE: &str = "Fitness Level by Age Group";

/// Produces charts and the text summary. Never mutates the tables it reads.
pub struct Reporter<'a> {
    settings: &'a AnalysisSettings,
}

impl<'a> Reporter<'a> {
    pub fn new(settings: &'a AnalysisSettings) -> Self {
        Self { settings }
    }

    /// Render every figure, close out the renderer, then print the summary.
    ///
    /// Returns the printed summary, or `None` when there was nothing to report.
    pub fn report(
        &self,
        cleaned: Option<&CleanedTable>,
        original: &DataFrame,
        renderer: &mut dyn ChartRenderer,
    ) -> Option<FrequencySummary> {
        let cleaned = match cleaned {
            Some(table) if !table.is_empty() => table,
            _ => {
                warn!("No data available for visualization");
                return None;
            }
        };

        let mut figures = vec![
            Figure::BoxPlot(Self::exercise_fitness_box_plot(cleaned)),
            Self::distribution_pies(cleaned),
        ];
        if let Some(chart) = self.age_fitness_box_plot(cleaned, original) {
            figures.push(Figure::BoxPlot(chart));
        }

        for figure in figures {
            let title = figure.title();
            if let Err(e) = renderer.render(figure) {
                error!("Failed to render '{}': {}", title, e);
            }
        }
        if let Err(e) = renderer.finish() {
            error!("{}", e);
        }

        let summary =
            FrequencySummary::from_codes(&cleaned.exercise_frequency(), &cleaned.fitness_level());
        println!();
        println!("{}", summary);

        if let Ok(json) = serde_json::to_string(&summary) {
            debug!(summary = %json, "Summary computed");
        }

        Some(summary)
    }

    /// Fitness level by exercise frequency, one box per observed frequency,
    /// with the group means joined as a line.
    pub fn exercise_fitness_box_plot(cleaned: &CleanedTable) -> BoxPlotChart {
        let keys = cleaned.exercise_frequency();
        let values: Vec<f64> = cleaned.fitness_level().iter().map(|&v| v as f64).collect();

        let mut by_group: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
        for (&k, &v) in keys.iter().zip(values.iter()) {
            by_group.entry(k).or_default().push(v);
        }

        let groups = by_group
            .into_iter()
            .filter_map(|(code, vals)| {
                let spread = StatsCalculator::box_spread(&vals)?;
                Some(BoxGroup {
                    position: code as f64,
                    label: Self::code_label(&EXERCISE_FREQUENCY_MAPPING, code),
                    values: vals,
                    spread,
                })
            })
            .collect();

        let means = StatsCalculator::group_means(&keys, &values)
            .into_iter()
            .map(|(code, mean)| [code as f64, mean])
            .collect();

        BoxPlotChart {
            title: EXERCISE_FITNESS_TITLE.to_string(),
            x_label: "Exercise Frequency".to_string(),
            y_label: "Perceived Fitness Level".to_string(),
            groups,
            x_ticks: Self::scale_ticks(&EXERCISE_FREQUENCY_MAPPING),
            y_ticks: Self::scale_ticks(&FITNESS_LEVEL_MAPPING),
            overlay: Some(OverlayLine {
                name: "Mean Fitness Level".to_string(),
                points: means,
            }),
            palette: Palette::Blues,
        }
    }

    /// Side-by-side pies of the fitness and exercise distributions.
    pub fn distribution_pies(cleaned: &CleanedTable) -> Figure {
        let fitness = PieChart::from_counts(
            FITNESS_PIE_TITLE,
            Self::value_counts(&cleaned.fitness_level(), &FITNESS_LEVEL_MAPPING),
            Palette::BluesDark,
        );
        let exercise = PieChart::from_counts(
            EXERCISE_PIE_TITLE,
            Self::value_counts(&cleaned.exercise_frequency(), &EXERCISE_FREQUENCY_MAPPING),
            Palette::GreensDark,
        );
        Figure::PieRow(vec![fitness, exercise])
    }

    /// Fitness level by age group, if the original table has an age column.
    pub fn age_fitness_box_plot(
        &self,
        cleaned: &CleanedTable,
        original: &DataFrame,
    ) -> Option<BoxPlotChart> {
        let ages = match DataCleaner::text_values(original, &self.settings.age_col) {
            Ok(Some(ages)) => ages,
            Ok(None) => {
                info!("No '{}' column; skipping age view", self.settings.age_col);
                return None;
            }
            Err(e) => {
                error!("Could not read '{}': {}", self.settings.age_col, e);
                return None;
            }
        };

        let pairs = Self::pair_age_fitness(&ages, cleaned, self.settings.age_alignment);
        if pairs.is_empty() {
            return None;
        }

        let mut order: Vec<String> = Vec::new();
        let mut by_age: HashMap<String, Vec<f64>> = HashMap::new();
        for (age, level) in pairs {
            if !by_age.contains_key(&age) {
                order.push(age.clone());
            }
            by_age.entry(age).or_default().push(level as f64);
        }
        Self::order_categories(&mut order);

        let mut groups = Vec::with_capacity(order.len());
        let mut x_ticks = Vec::with_capacity(order.len());
        for (i, age) in order.into_iter().enumerate() {
            let values = by_age.remove(&age).unwrap_or_default();
            let Some(spread) = StatsCalculator::box_spread(&values) else {
                continue;
            };
            x_ticks.push(AxisTick::new(i as f64, age.clone()));
            groups.push(BoxGroup {
                position: i as f64,
                label: age,
                values,
                spread,
            });
        }

        Some(BoxPlotChart {
            title: AGE_FITNESS_TITLE.to_string(),
            x_label: "Age Group".to_string(),
            y_label: "Fitness Level".to_string(),
            groups,
            x_ticks,
            y_ticks: Vec::new(),
            overlay: None,
            palette: Palette::Viridis,
        })
    }

    /// Pair each respondent's age with a cleaned fitness level.
    ///
    /// `RowId` joins on the carried row id, so dropped respondents contribute
    /// nothing. `Positional` pairs original row i with cleaned row i, which
    /// drifts as soon as cleaning dropped a row. Null ages are skipped.
    pub fn pair_age_fitness(
        ages: &[Option<String>],
        cleaned: &CleanedTable,
        alignment: AgeAlignment,
    ) -> Vec<(String, i64)> {
        let levels = cleaned.fitness_level();

        match alignment {
            AgeAlignment::RowId => {
                let by_row: HashMap<u32, i64> =
                    cleaned.row_ids().into_iter().zip(levels).collect();
                ages.iter()
                    .enumerate()
                    .filter_map(|(i, age)| {
                        let level = by_row.get(&u32::try_from(i).ok()?)?;
                        Some((age.clone()?, *level))
                    })
                    .collect()
            }
            AgeAlignment::Positional => ages
                .iter()
                .zip(levels)
                .filter_map(|(age, level)| Some((age.clone()?, level)))
                .collect(),
        }
    }

    /// Numeric categories sort ascending; text categories keep first-appearance order.
    fn order_categories(order: &mut [String]) {
        let numeric: Option<Vec<f64>> = order.iter().map(|a| a.trim().parse().ok()).collect();
        if let Some(keys) = numeric {
            let mut keyed: Vec<(f64, String)> =
                keys.into_iter().zip(order.iter().cloned()).collect();
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            for (slot, (_, age)) in order.iter_mut().zip(keyed) {
                *slot = age;
            }
        }
    }

    /// Counts per code, ascending, labelled with the scale's display names.
    fn value_counts(codes: &[i64], mapping: &CategoryMapping) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for &c in codes {
            *counts.entry(c).or_default() += 1;
        }
        counts
            .into_iter()
            .map(|(code, count)| (Self::code_label(mapping, code), count))
            .collect()
    }

    fn code_label(mapping: &CategoryMapping, code: i64) -> String {
        mapping
            .label(code)
            .map(str::to_string)
            .unwrap_or_else(|| code.to_string())
    }

    fn scale_ticks(mapping: &CategoryMapping) -> Vec<AxisTick> {
        mapping
            .ticks()
            .into_iter()
            .map(|(code, label)| AxisTick::new(code as f64, label))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::RecordingRenderer;
    use crate::settings::{EXERCISE_QUESTION, FITNESS_QUESTION};
    use polars::prelude::*;

    fn survey(age: &[&str], exercise: &[&str], fitness: &[&str]) -> DataFrame {
        DataFrame::new(vec![
            Column::new("Your age".into(), age),
            Column::new(EXERCISE_QUESTION.into(), exercise),
            Column::new(FITNESS_QUESTION.into(), fitness),
        ])
        .unwrap()
    }

    fn cleaned(df: &DataFrame) -> CleanedTable {
        DataCleaner::new(EXERCISE_QUESTION, FITNESS_QUESTION)
            .clean(df)
            .unwrap()
    }

    fn box_plots(renderer: &RecordingRenderer) -> Vec<&BoxPlotChart> {
        renderer
            .figures
            .iter()
            .filter_map(|f| match f {
                Figure::BoxPlot(chart) => Some(chart),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_report_renders_all_figures() {
        let df = survey(
            &["19 to 25", "26 to 30", "19 to 25"],
            &["Never", "Everyday", "garbage"],
            &["Unfit", "Excellent", "Good"],
        );
        let table = cleaned(&df);
        let settings = AnalysisSettings::default();
        let mut renderer = RecordingRenderer::new();

        let summary = Reporter::new(&settings)
            .report(Some(&table), &df, &mut renderer)
            .expect("summary for non-empty table");

        assert_eq!(renderer.figures.len(), 3);
        assert_eq!(renderer.finished, 1);
        assert!(matches!(renderer.figures[1], Figure::PieRow(_)));
        assert_eq!(summary.groups.len(), 2);
        assert_eq!(format!("{:.2}", summary.correlation), "1.00");
    }

    #[test]
    fn test_report_empty_table_renders_nothing() {
        let df = survey(&["19 to 25"], &["sometimes"], &["Good"]);
        let table = cleaned(&df);
        assert!(table.is_empty());

        let settings = AnalysisSettings::default();
        let mut renderer = RecordingRenderer::new();

        assert!(Reporter::new(&settings)
            .report(Some(&table), &df, &mut renderer)
            .is_none());
        assert!(renderer.figures.is_empty());
        assert_eq!(renderer.finished, 0);
    }

    #[test]
    fn test_report_absent_table_renders_nothing() {
        let df = DataFrame::empty();
        let settings = AnalysisSettings::default();
        let mut renderer = RecordingRenderer::new();

        assert!(Reporter::new(&settings)
            .report(None, &df, &mut renderer)
            .is_none());
        assert!(renderer.figures.is_empty());
    }

    #[test]
    fn test_exercise_box_plot_groups_and_means() {
        let df = survey(
            &["a", "a", "a", "a"],
            &["Never", "Never", "3 to 4 times a week", "Everyday"],
            &["Unfit", "Good", "Very good", "Excellent"],
        );
        let chart = Reporter::exercise_fitness_box_plot(&cleaned(&df));

        let positions: Vec<f64> = chart.groups.iter().map(|g| g.position).collect();
        assert_eq!(positions, vec![0.0, 2.0, 3.0]);
        let labels: Vec<&str> = chart.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["Never", "3-4x/week", "5+ times/week"]);

        let overlay = chart.overlay.expect("mean line");
        assert_eq!(overlay.points, vec![[0.0, 2.0], [2.0, 4.0], [3.0, 5.0]]);

        assert_eq!(chart.x_ticks.len(), 4);
        assert_eq!(chart.y_ticks[1], AxisTick::new(2.0, "Average"));
    }

    #[test]
    fn test_distribution_pies_sorted_by_category() {
        let df = survey(
            &["a", "a", "a", "a"],
            &["Everyday", "Never", "Everyday", "1 to 2 times a week"],
            &["Good", "Average", "Good", "Not very good"],
        );

        let Figure::PieRow(pies) = Reporter::distribution_pies(&cleaned(&df)) else {
            panic!("expected a pie row");
        };

        assert_eq!(pies[0].title, FITNESS_PIE_TITLE);
        let fitness: Vec<(&str, usize)> = pies[0]
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.count))
            .collect();
        assert_eq!(fitness, vec![("Average", 2), ("Good", 2)]);

        assert_eq!(pies[1].title, EXERCISE_PIE_TITLE);
        let exercise: Vec<(&str, String)> = pies[1]
            .slices
            .iter()
            .map(|s| (s.label.as_str(), s.percent_label()))
            .collect();
        assert_eq!(
            exercise,
            vec![
                ("Never", "25.0%".to_string()),
                ("1-3x/week", "25.0%".to_string()),
                ("5+ times/week", "50.0%".to_string()),
            ]
        );
    }

    #[test]
    fn test_age_pairing_by_row_id_skips_dropped_rows() {
        let df = survey(
            &["19 to 25", "26 to 30", "31 to 40"],
            &["garbage", "Never", "Everyday"],
            &["Good", "Unfit", "Excellent"],
        );
        let table = cleaned(&df);
        let ages = DataCleaner::text_values(&df, "Your age").unwrap().unwrap();

        let pairs = Reporter::pair_age_fitness(&ages, &table, AgeAlignment::RowId);

        assert_eq!(
            pairs,
            vec![("26 to 30".to_string(), 1), ("31 to 40".to_string(), 5)]
        );
    }

    #[test]
    fn test_age_pairing_positional_drifts_after_drop() {
        let df = survey(
            &["19 to 25", "26 to 30", "31 to 40"],
            &["garbage", "Never", "Everyday"],
            &["Good", "Unfit", "Excellent"],
        );
        let table = cleaned(&df);
        let ages = DataCleaner::text_values(&df, "Your age").unwrap().unwrap();

        let pairs = Reporter::pair_age_fitness(&ages, &table, AgeAlignment::Positional);

        assert_eq!(
            pairs,
            vec![("19 to 25".to_string(), 1), ("26 to 30".to_string(), 5)]
        );
    }

    #[test]
    fn test_age_pairing_strategies_agree_without_drops() {
        let df = survey(
            &["19 to 25", "26 to 30"],
            &["Never", "Everyday"],
            &["Unfit", "Excellent"],
        );
        let table = cleaned(&df);
        let ages = DataCleaner::text_values(&df, "Your age").unwrap().unwrap();

        assert_eq!(
            Reporter::pair_age_fitness(&ages, &table, AgeAlignment::RowId),
            Reporter::pair_age_fitness(&ages, &table, AgeAlignment::Positional)
        );
    }

    #[test]
    fn test_age_view_groups_in_appearance_order() {
        let df = survey(
            &["26 to 30", "19 to 25", "26 to 30"],
            &["Never", "Everyday", "Never"],
            &["Unfit", "Excellent", "Good"],
        );
        let settings = AnalysisSettings::default();
        let mut renderer = RecordingRenderer::new();
        Reporter::new(&settings).report(Some(&cleaned(&df)), &df, &mut renderer);

        let charts = box_plots(&renderer);
        assert_eq!(charts.len(), 2);
        let age = charts[1];
        assert_eq!(age.title, AGE_FITNESS_TITLE);
        let labels: Vec<&str> = age.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["26 to 30", "19 to 25"]);
        assert_eq!(age.groups[0].values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_age_view_sorts_numeric_ages() {
        let df = survey(
            &["31", "19", "25", "19"],
            &["Never", "Everyday", "Never", "Never"],
            &["Unfit", "Excellent", "Good", "Average"],
        );
        let settings = AnalysisSettings::default();
        let mut renderer = RecordingRenderer::new();
        Reporter::new(&settings).report(Some(&cleaned(&df)), &df, &mut renderer);

        let age = box_plots(&renderer)[1];
        let labels: Vec<&str> = age.x_ticks.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["19", "25", "31"]);
        assert_eq!(age.groups[0].values, vec![5.0, 2.0]);
        assert_eq!(age.groups[0].position, 0.0);
    }

    #[test]
    fn test_age_view_skipped_without_age_column() {
        let df = DataFrame::new(vec![
            Column::new(EXERCISE_QUESTION.into(), &["Never"]),
            Column::new(FITNESS_QUESTION.into(), &["Good"]),
        ])
        .unwrap();
        let settings = AnalysisSettings::default();
        let mut renderer = RecordingRenderer::new();

        Reporter::new(&settings).report(Some(&cleaned(&df)), &df, &mut renderer);

        assert_eq!(renderer.figures.len(), 2);
        assert_eq!(box_plots(&renderer).len(), 1);
    }
}
