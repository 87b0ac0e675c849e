//! Status projection — the four-stage display view of the settlement pipeline.
//!
//! The backend runs five pipeline states plus `FAILED`; displays collapse
//! `ONRAMP_COMPLETE` into the off-ramp slot for a simpler progress view.
//! Everything here is a pure function of `PaymentStatus` — the projection is
//! derived on demand, never stored.

use super::PaymentStatus;

/// One slot of the simplified progress sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayStage {
    Pending,
    OnrampPending,
    OfframpPending,
    Completed,
}

/// The display sequence, in pipeline order.
pub const DISPLAY_STAGES: [DisplayStage; 4] = [
    DisplayStage::Pending,
    DisplayStage::OnrampPending,
    DisplayStage::OfframpPending,
    DisplayStage::Completed,
];

impl DisplayStage {
    pub fn index(self) -> usize {
        match self {
            DisplayStage::Pending => 0,
            DisplayStage::OnrampPending => 1,
            DisplayStage::OfframpPending => 2,
            DisplayStage::Completed => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayStage::Pending => "Initiated",
            DisplayStage::OnrampPending => "On-ramp in progress",
            DisplayStage::OfframpPending => "Off-ramp in progress",
            DisplayStage::Completed => "Completed",
        }
    }
}

impl PaymentStatus {
    /// The display slot this status occupies. `FAILED` occupies none — it is
    /// flagged separately rather than given a fifth visual stage.
    pub fn display_stage(self) -> Option<DisplayStage> {
        match self {
            PaymentStatus::Pending => Some(DisplayStage::Pending),
            PaymentStatus::OnrampPending => Some(DisplayStage::OnrampPending),
            PaymentStatus::OnrampComplete | PaymentStatus::OfframpPending => {
                Some(DisplayStage::OfframpPending)
            }
            PaymentStatus::Completed => Some(DisplayStage::Completed),
            PaymentStatus::Failed => None,
        }
    }

    /// Human label for the status, routed through the display projection.
    pub fn display_label(self) -> &'static str {
        match self.display_stage() {
            Some(stage) => stage.label(),
            None => "Failed",
        }
    }
}

/// How one slot of the sequence should be rendered for a given status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMark {
    /// Passed, or the final stage of a completed payment: success icon.
    Done,
    /// The stage currently in flight: spinner.
    Active,
    /// Not reached yet: placeholder.
    Upcoming,
}

/// Mark for the stage at `position` (0-based) given the current status.
///
/// `COMPLETED` is both a status and the last element of the sequence: its
/// own slot must render `Done`, not a spinner.
pub fn stage_mark(status: PaymentStatus, position: usize) -> StageMark {
    let current = match status.display_stage() {
        Some(stage) => stage.index(),
        // Failed payments highlight no stage.
        None => return StageMark::Upcoming,
    };

    if position < current {
        StageMark::Done
    } else if position == current {
        if status == PaymentStatus::Completed {
            StageMark::Done
        } else {
            StageMark::Active
        }
    } else {
        StageMark::Upcoming
    }
}

/// Progress share for a compact bar, in percent.
pub fn progress_percent(status: PaymentStatus) -> u8 {
    match status.display_stage() {
        Some(stage) => (((stage.index() + 1) * 100) / DISPLAY_STAGES.len()) as u8,
        None => 0,
    }
}

/// Badge tone for a status chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    Info,
    Caution,
    Positive,
    Negative,
}

pub fn status_tone(status: PaymentStatus) -> StatusTone {
    match status {
        PaymentStatus::Pending => StatusTone::Neutral,
        PaymentStatus::OnrampPending | PaymentStatus::OfframpPending => StatusTone::Info,
        PaymentStatus::OnrampComplete => StatusTone::Caution,
        PaymentStatus::Completed => StatusTone::Positive,
        PaymentStatus::Failed => StatusTone::Negative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_onramp_complete_collapses_to_offramp_slot() {
        let stage = PaymentStatus::OnrampComplete.display_stage().unwrap();
        assert_eq!(stage, DisplayStage::OfframpPending);
        assert_eq!(stage.index(), 2);
        assert_eq!(DISPLAY_STAGES.len(), 4);
    }

    #[test]
    fn test_completed_is_done_not_active() {
        // The final stage of a completed payment renders a success icon.
        assert_eq!(
            PaymentStatus::Completed.display_stage().unwrap().index(),
            3
        );
        assert_eq!(stage_mark(PaymentStatus::Completed, 3), StageMark::Done);
        assert_ne!(stage_mark(PaymentStatus::Completed, 3), StageMark::Active);
    }

    #[test]
    fn test_stage_marks_around_current() {
        assert_eq!(stage_mark(PaymentStatus::OfframpPending, 0), StageMark::Done);
        assert_eq!(stage_mark(PaymentStatus::OfframpPending, 1), StageMark::Done);
        assert_eq!(
            stage_mark(PaymentStatus::OfframpPending, 2),
            StageMark::Active
        );
        assert_eq!(
            stage_mark(PaymentStatus::OfframpPending, 3),
            StageMark::Upcoming
        );
    }

    #[test]
    fn test_failed_highlights_no_stage() {
        for position in 0..DISPLAY_STAGES.len() {
            assert_eq!(stage_mark(PaymentStatus::Failed, position), StageMark::Upcoming);
        }
        assert_eq!(progress_percent(PaymentStatus::Failed), 0);
        assert_eq!(PaymentStatus::Failed.display_label(), "Failed");
    }

    #[test]
    fn test_progress_percent_by_stage() {
        assert_eq!(progress_percent(PaymentStatus::Pending), 25);
        assert_eq!(progress_percent(PaymentStatus::OnrampPending), 50);
        assert_eq!(progress_percent(PaymentStatus::OnrampComplete), 75);
        assert_eq!(progress_percent(PaymentStatus::OfframpPending), 75);
        assert_eq!(progress_percent(PaymentStatus::Completed), 100);
    }
}
