//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers, no closures, no dynamic
//! dispatch, no heap.
//!
//! ```text
//!                  [no motion for absence_threshold_secs]
//!  SESSION_ACTIVE ───────────────────────────────────────▶ ALARMED
//!   buzzer off                                              buzzer on
//!   session ticking  ◀──────────[motion]───────────────────  session = 0
//! ```

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; StateId::COUNT] {
    [
        // Index 0: SessionActive
        StateDescriptor {
            name: "SessionActive",
            on_enter: Some(session_enter),
            on_update: session_update,
        },
        // Index 1: Alarmed
        StateDescriptor {
            name: "Alarmed",
            on_enter: Some(alarmed_enter),
            on_update: alarmed_update,
        },
    ]
}

/// Shared absence bookkeeping: clear on motion, otherwise accumulate.
fn track_absence(ctx: &mut FsmContext) {
    if ctx.inputs.motion_detected {
        ctx.state.no_motion_secs = 0;
    } else {
        ctx.state.no_motion_secs = ctx.state.no_motion_secs.saturating_add(ctx.tick_secs);
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SESSION_ACTIVE state: someone is in the room
// ═══════════════════════════════════════════════════════════════════════════

fn session_enter(ctx: &mut FsmContext) {
    ctx.state.buzzer_on = false;
    ctx.state.session_active = true;
    ctx.state.session_secs = 0;
    info!("SESSION: started, buzzer off");
}

fn session_update(ctx: &mut FsmContext) -> Option<StateId> {
    track_absence(ctx);

    if !ctx.state.buzzer_on && ctx.absence_elapsed() {
        warn!(
            "SESSION: no motion for {}s, resetting session after {}s",
            ctx.state.no_motion_secs, ctx.state.session_secs
        );
        return Some(StateId::Alarmed);
    }

    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  ALARMED state: user away, buzzer sounding
// ═══════════════════════════════════════════════════════════════════════════

fn alarmed_enter(ctx: &mut FsmContext) {
    ctx.state.buzzer_on = true;
    ctx.state.session_active = false;
    ctx.state.session_secs = 0;
    info!("ALARMED: user away, buzzer on");
}

fn alarmed_update(ctx: &mut FsmContext) -> Option<StateId> {
    track_absence(ctx);

    if ctx.inputs.motion_detected {
        info!(
            "ALARMED: motion after {}s away, restarting session",
            ctx.secs_in_state()
        );
        return Some(StateId::SessionActive);
    }

    None
}
