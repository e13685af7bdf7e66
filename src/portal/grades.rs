//! Grades and transcript page: GPA and credit counters, semester GPA, grade
//! distribution and outstanding-grade highlights.

use std::collections::BTreeMap;

use crate::animation::CountUpOptions;
use crate::animator::{Animator, Launch};
use crate::error::Result;
use crate::parse::{parse_decimal, parse_integer};
use crate::surface::{SurfaceFlags, TextSurface};

/// Count the cumulative GPA up from zero.
pub fn animate_gpa<S>(animator: &mut Animator, surface: &S) -> Result<Option<Launch>>
where
    S: TextSurface + Clone + 'static,
{
    surface.insert_flags(SurfaceFlags::VISIBLE);
    animator.animate_parsed(surface, parse_decimal, CountUpOptions::gpa())
}

/// Count earned credits up in whole steps.
pub fn animate_credits<S>(animator: &mut Animator, surface: &S) -> Result<Option<Launch>>
where
    S: TextSurface + Clone + 'static,
{
    surface.insert_flags(SurfaceFlags::VISIBLE);
    animator.animate_parsed(
        surface,
        |text| parse_integer(text).map(|credits| credits as f64),
        CountUpOptions::credits(),
    )
}

/// Grade points for a letter grade on the 4.0 scale
pub fn grade_points(grade: &str) -> Option<f64> {
    let points = match grade.trim() {
        "A" => 4.0,
        "A-" => 3.7,
        "B+" => 3.3,
        "B" => 3.0,
        "B-" => 2.7,
        "C+" => 2.3,
        "C" => 2.0,
        "C-" => 1.7,
        "D+" => 1.3,
        "D" => 1.0,
        "F" => 0.0,
        _ => return None,
    };
    Some(points)
}

/// Credit-weighted GPA of `(credits, grade)` rows as rendered in a semester
/// table. Rows with unparseable credits or an unknown grade (e.g. `"IP"`) are
/// skipped. Returns `0.0` when no row counts.
pub fn semester_gpa<'a, I>(rows: I) -> f64
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let (points, credits) = rows
        .into_iter()
        .filter_map(|(credits, grade)| {
            Some((parse_integer(credits)? as f64, grade_points(grade)?))
        })
        .fold((0.0, 0.0), |(points, total), (credits, grade)| {
            (points + credits * grade, total + credits)
        });

    if credits > 0.0 {
        points / credits
    } else {
        0.0
    }
}

/// Whether a grade badge shows outstanding performance (`A` or `A-`)
pub fn is_outstanding(grade: &str) -> bool {
    matches!(grade.trim(), "A" | "A-")
}

/// Set [`SurfaceFlags::HIGHLIGHTED`] on every outstanding grade badge.
/// Returns how many were highlighted.
pub fn highlight_outstanding<S: TextSurface>(badges: &[S]) -> usize {
    let mut highlighted = 0;
    for badge in badges {
        if is_outstanding(&badge.text()) {
            badge.insert_flags(SurfaceFlags::HIGHLIGHTED);
            highlighted += 1;
        }
    }
    highlighted
}

/// Number of occurrences of each grade label
pub fn grade_distribution<'a, I>(grades: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut distribution = BTreeMap::new();
    for grade in grades {
        *distribution.entry(grade.trim().to_string()).or_insert(0) += 1;
    }
    distribution
}
