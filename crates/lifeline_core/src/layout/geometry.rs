//! Canvas geometry: span, canvas width and horizontal positions.
//!
//! All lengths are CSS-style pixels on an unscaled canvas whose left edge is
//! the origin.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canvas never shrinks below this width.
pub const MIN_CANVAS_WIDTH: f64 = 1400.0;
/// Horizontal pixels per timeline year at zoom 1.
pub const PIXELS_PER_YEAR: f64 = 120.0;
/// Reserved for axis labels on each side of the drawing area.
pub const CANVAS_PADDING: f64 = 200.0;

/// Year range covered by a set of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineSpan {
    pub start_year: i32,
    pub end_year: i32,
}

impl TimelineSpan {
    /// Span of a single year, used when there is nothing to measure.
    pub fn collapsed(year: i32) -> Self {
        Self {
            start_year: year,
            end_year: year,
        }
    }

    /// Min/max year across `dates`, or `None` when `dates` is empty.
    pub fn from_dates<I>(dates: I) -> Option<Self>
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        dates.into_iter().fold(None, |span, date| {
            let year = date.year();
            Some(match span {
                None => Self::collapsed(year),
                Some(Self {
                    start_year,
                    end_year,
                }) => Self {
                    start_year: start_year.min(year),
                    end_year: end_year.max(year),
                },
            })
        })
    }

    /// `end_year - start_year + 1`, never below 1.
    pub fn total_years(&self) -> u32 {
        let total = i64::from(self.end_year) - i64::from(self.start_year) + 1;
        u32::try_from(total.max(1)).unwrap_or(u32::MAX)
    }
}

/// `max(1400, total_years * 120 * zoom)`.
pub fn canvas_width(total_years: u32, zoom: f64) -> f64 {
    (f64::from(total_years) * PIXELS_PER_YEAR * zoom).max(MIN_CANVAS_WIDTH)
}

/// Width left for plotting once both side paddings are removed.
pub fn drawing_width(canvas_width: f64) -> f64 {
    canvas_width - 2.0 * CANVAS_PADDING
}

/// Fractional position of `date` within `span`.
///
/// Months contribute `month0 / 12` (January is 0) so same-year events spread
/// out. Days are ignored.
pub fn year_progress(date: NaiveDate, span: &TimelineSpan) -> f64 {
    let years_in = f64::from(date.year() - span.start_year);
    let month_fraction = f64::from(date.month0()) / 12.0;
    (years_in + month_fraction) / f64::from(span.total_years())
}

/// Horizontal pixel offset of `date` from the canvas origin.
pub fn pixel_x(date: NaiveDate, span: &TimelineSpan, zoom: f64) -> f64 {
    let canvas = canvas_width(span.total_years(), zoom);
    CANVAS_PADDING + year_progress(date, span) * drawing_width(canvas)
}

#[cfg(test)]
mod tests {
    use super::{canvas_width, pixel_x, year_progress, TimelineSpan, MIN_CANVAS_WIDTH};
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn canvas_width_has_a_floor() {
        assert_relative_eq!(canvas_width(1, 1.0), MIN_CANVAS_WIDTH);
        assert_relative_eq!(canvas_width(0, 5.0), MIN_CANVAS_WIDTH);
        assert_relative_eq!(canvas_width(33, 1.0), 3960.0);
    }

    #[test]
    fn canvas_width_scales_linearly_with_zoom_above_floor() {
        for k in [1.5, 2.25, 3.375, 5.0] {
            assert_relative_eq!(canvas_width(40, 1.0) * k, canvas_width(40, k));
        }
    }

    #[test]
    fn span_is_min_max_year_and_never_zero_length() {
        let span =
            TimelineSpan::from_dates([date(2001, 1, 1), date(1990, 5, 5), date(1995, 1, 1)])
                .unwrap();
        assert_eq!(span.start_year, 1990);
        assert_eq!(span.end_year, 2001);
        assert_eq!(span.total_years(), 12);

        assert_eq!(TimelineSpan::from_dates(Vec::new()), None);
        assert_eq!(TimelineSpan::collapsed(2024).total_years(), 1);

        let inverted = TimelineSpan {
            start_year: 2000,
            end_year: 1999,
        };
        assert_eq!(inverted.total_years(), 1);
    }

    #[test]
    fn month_offsets_events_within_one_year() {
        let span = TimelineSpan::collapsed(2020);
        assert_relative_eq!(year_progress(date(2020, 1, 31), &span), 0.0);
        assert_relative_eq!(year_progress(date(2020, 7, 1), &span), 0.5);
        assert!(pixel_x(date(2020, 7, 1), &span, 1.0) > pixel_x(date(2020, 6, 30), &span, 1.0));
    }

    #[test]
    fn single_year_event_at_january_sits_on_left_padding() {
        let span = TimelineSpan::collapsed(2020);
        let x = pixel_x(date(2020, 1, 15), &span, 1.0);
        assert!(x.is_finite());
        assert_relative_eq!(x, 200.0);
    }
}
