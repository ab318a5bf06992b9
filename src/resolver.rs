//! The transition resolver: a pure mapping from (step, completion event) to
//! the next step index.

use crate::event::CompletionEvent;
use crate::script::Step;

/// Resolves the next step index for a completed step, with strict priority:
///
/// 1. An explicit `next_step_index` on the event is used verbatim.
/// 2. A `choice` step branches to `success_next`/`fail_next` by the event's
///    success flag, when the branch is defined.
/// 3. A static `next` on the step record ("return to step N" links) is used.
/// 4. Otherwise, default-next: `current_index + 1`, clamped so the final step
///    is a no-op rather than an overrun. (Reaching the final step without a
///    terminal `end`/`ad` is a script authoring concern.)
///
/// An `end` step's restart is a controller operation, not a resolver case.
/// Out-of-range targets are an authoring bug caught by `Script::validate`,
/// not guarded here.
pub fn resolve_next(
    step: &Step,
    event: &CompletionEvent,
    current_index: usize,
    script_len: usize,
) -> usize {
    if let Some(target) = event.next_step_index {
        return target;
    }

    if let Step::Choice(choice) = step {
        let branch = if event.success {
            choice.success_next
        } else {
            choice.fail_next
        };
        if let Some(target) = branch {
            return target;
        }
    }

    if let Some(target) = step.static_next() {
        return target;
    }

    (current_index + 1).min(script_len.saturating_sub(1))
}
