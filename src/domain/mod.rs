//! Domain logic for order statuses, guards and transitions

mod states;
mod transitions;
mod validation;


pub use states::{
    get_next_status, get_status_index, is_payment_stage, is_terminal_status, progress_of,
    Progress, ORDER_STATUSES,
};
pub use transitions::{apply_transition, transition_for_stage, OrderTransition, TransitionOutcome};
pub use validation::{
    can_complete_checklist, can_complete_photos_after, can_complete_photos_before,
    can_confirm_payment, validate_transition, BlockReason, GuardResult,
};
