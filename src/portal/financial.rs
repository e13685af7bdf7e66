//! Financial aid dashboard: balances, aid amounts, payment progress and
//! account status.

use crate::animation::CountUpOptions;
use crate::animator::Animator;
use crate::error::Result;
use crate::format::Formatter;
use crate::parse::parse_currency;
use crate::surface::{SurfaceFlags, TextSurface};

use super::animate_all;

/// Count up every balance figure that holds a currency amount.
pub fn animate_balances<S>(animator: &mut Animator, surfaces: &[S]) -> Result<usize>
where
    S: TextSurface + Clone + 'static,
{
    let formatter = animator.config().formatter.clone();
    animate_all(
        animator,
        surfaces,
        |text| parse_currency(text, &formatter),
        &CountUpOptions::balance(),
    )
}

/// Count up every aid package amount that holds a currency amount.
pub fn animate_aid_amounts<S>(animator: &mut Animator, surfaces: &[S]) -> Result<usize>
where
    S: TextSurface + Clone + 'static,
{
    let formatter = animator.config().formatter.clone();
    animate_all(
        animator,
        surfaces,
        |text| parse_currency(text, &formatter),
        &CountUpOptions::aid_amount(),
    )
}

/// Percentage of the charged total that has been paid, to one decimal place.
///
/// `None` when nothing has been charged.
pub fn payment_progress(total_charged: f64, total_paid: f64) -> Option<f64> {
    if total_charged.is_nan() || total_charged <= 0.0 || !total_paid.is_finite() {
        return None;
    }
    Some((total_paid / total_charged * 1000.0).round() / 10.0)
}

/// [`payment_progress`] on rendered amounts; unparseable amounts count as zero.
pub fn payment_progress_text(charged: &str, paid: &str, formatter: &Formatter) -> Option<f64> {
    let charged = parse_currency(charged, formatter).unwrap_or(0.0);
    let paid = parse_currency(paid, formatter).unwrap_or(0.0);
    payment_progress(charged, paid)
}

/// Whether an account status label means the student has to act
pub fn account_needs_attention(status: &str) -> bool {
    let status = status.trim().to_lowercase();
    status.contains("past due") || status.contains("hold")
}

/// Flag the status surface with [`SurfaceFlags::WARNING`] when the account
/// needs attention. Returns whether the flag was set.
pub fn flag_account_status(surface: &impl TextSurface) -> bool {
    let attention = account_needs_attention(&surface.text());
    if attention {
        surface.insert_flags(SurfaceFlags::WARNING);
    }
    attention
}
