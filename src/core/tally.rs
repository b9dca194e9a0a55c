use crate::core::models::poll::{Poll, PollStatus};
use crate::error::Error;

/// Applies one viewer's choice to a poll, retracting their previous choice
/// first when `previous` names a different option. Counts and percentages are
/// consistent on return: `total_votes == Σ votes` and no count goes negative.
pub fn cast_vote(poll: &mut Poll, option_id: &str, previous: Option<&str>) -> Result<(), Error> {
    if poll.status != PollStatus::Active {
        return Err(Error::PollClosed(poll.id.clone()));
    }
    let chosen = poll
        .options
        .iter()
        .position(|o| o.id == option_id)
        .ok_or_else(|| Error::InvalidOption {
            poll: poll.id.clone(),
            option: option_id.to_owned(),
        })?;
    // Re-voting for the held option changes nothing.
    if previous == Some(option_id) {
        return Ok(());
    }
    if let Some(prev) = previous {
        if let Some(opt) = poll.options.iter_mut().find(|o| o.id == prev) {
            if opt.votes > 0 && poll.total_votes > 0 {
                opt.votes -= 1;
                poll.total_votes -= 1;
            }
        }
    }
    poll.options[chosen].votes += 1;
    poll.total_votes += 1;
    recompute_percentages(poll);
    Ok(())
}

/// Rewrites every option's derived percentage from the current counts.
pub fn recompute_percentages(poll: &mut Poll) {
    for opt in &mut poll.options {
        opt.percentage = share(opt.votes, poll.total_votes);
    }
}

/// One-decimal percentage share, 0.0 for an empty total.
pub fn share(votes: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (votes as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Display form of a share. Whole shares drop the fraction, matching how the
/// result widgets render them ("45%", "44.6%", and "0%" for an empty poll).
pub fn format_percentage(votes: i64, total: i64) -> String {
    let pct = share(votes, total);
    if pct.fract() == 0.0 {
        format!("{}%", pct as i64)
    } else {
        format!("{}%", pct)
    }
}
