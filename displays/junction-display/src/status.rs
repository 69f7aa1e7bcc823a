//! Status rows
//!
//! Row 0 shows six indicators (`X` for an unserved sensor, the last one for
//! hazard mode) and the elapsed time-period counter in columns 11-15.
//! Row 1 shows a direction hint followed by up to two phase codes, each
//! with the colour of the group it names.

use core::fmt::Write;

use heapless::String;
use junction_core::scheduler::StatusSnapshot;
use junction_core::signal::{Colour, GroupId};
use junction_core::state::Phase;

use crate::screen::{Screen, LINE_LEN};

/// Counter wraps at five digits
const COUNTER_MODULUS: u32 = 100_000;

/// Render the controller status onto the screen
pub fn render_status(screen: &mut Screen, status: &StatusSnapshot, counter: u32) {
    screen.set_line(0, &indicator_row(status, counter));
    screen.set_line(1, &phase_row(status));
}

fn indicator_row(status: &StatusSnapshot, counter: u32) -> String<LINE_LEN> {
    let mut line = String::new();
    for &flag in status.indicators.iter() {
        let _ = line.push(if flag { 'X' } else { '_' });
    }
    let _ = write!(line, "     {:05}", counter % COUNTER_MODULUS);
    line
}

fn phase_row(status: &StatusSnapshot) -> String<LINE_LEN> {
    let west = status.colour(GroupId::ThroughWest);
    let east = status.colour(GroupId::ThroughEast);

    let (direction, first, second) = match status.phase {
        Phase::Hazard => (' ', Some(("HZD", None)), None),
        Phase::Default => {
            let direction = match (west, east) {
                (Colour::Green, e) if e != Colour::Green => 'W',
                (w, Colour::Green) if w != Colour::Green => 'E',
                _ => ' ',
            };
            (direction, Some(("THR", Some(west))), None)
        }
        Phase::TurnPhase => (
            'W',
            Some(("THR", Some(west))),
            Some(("TRN", Some(status.colour(GroupId::Turn)))),
        ),
        Phase::SideStreetA => (' ', Some(("SSA", Some(status.colour(GroupId::SideA)))), None),
        Phase::SideStreetB => (' ', Some(("SSB", Some(status.colour(GroupId::SideB)))), None),
    };

    let mut line = String::new();
    let _ = line.push(direction);
    for (code, colour) in [first, second].into_iter().flatten() {
        let _ = line.push_str(code);
        let _ = line.push(colour.map(Colour::code).unwrap_or(' '));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use junction_core::signal::GROUP_COUNT;

    fn snapshot(phase: Phase, colours: [Colour; GROUP_COUNT]) -> StatusSnapshot {
        StatusSnapshot {
            phase,
            colours,
            indicators: [false; 6],
        }
    }

    // Colours in GroupId::ALL order: west, east, turn, side A, side B
    const G: Colour = Colour::Green;
    const Y: Colour = Colour::Yellow;
    const R: Colour = Colour::Red;

    #[test]
    fn test_indicator_row() {
        let mut status = snapshot(Phase::Default, [G, G, R, R, R]);
        status.indicators = [true, false, false, false, true, true];
        let mut screen = Screen::new();

        render_status(&mut screen, &status, 123_456);
        assert_eq!(screen.get_line(0), Some("X___XX     23456"));
    }

    #[test]
    fn test_default_row() {
        let mut screen = Screen::new();
        render_status(&mut screen, &snapshot(Phase::Default, [G, G, R, R, R]), 7);
        assert_eq!(screen.get_line(0), Some("______     00007"));
        assert_eq!(screen.get_line(1), Some(" THRG           "));

        render_status(&mut screen, &snapshot(Phase::Default, [G, Y, R, R, R]), 7);
        assert_eq!(screen.get_line(1), Some("WTHRG           "));

        render_status(&mut screen, &snapshot(Phase::Default, [R, G, R, R, R]), 7);
        assert_eq!(screen.get_line(1), Some("ETHRR           "));
    }

    #[test]
    fn test_turn_row() {
        let mut screen = Screen::new();
        render_status(&mut screen, &snapshot(Phase::TurnPhase, [G, R, Y, R, R]), 0);
        assert_eq!(screen.get_line(1), Some("WTHRGTRNY       "));
    }

    #[test]
    fn test_side_street_and_hazard_rows() {
        let mut screen = Screen::new();
        render_status(&mut screen, &snapshot(Phase::SideStreetB, [R, R, R, R, G]), 0);
        assert_eq!(screen.get_line(1), Some(" SSBG           "));

        let dark = [Colour::Off; GROUP_COUNT];
        render_status(&mut screen, &snapshot(Phase::SideStreetA, dark), 0);
        assert_eq!(screen.get_line(1), Some(" SSA_           "));

        render_status(&mut screen, &snapshot(Phase::Hazard, [Y; GROUP_COUNT]), 0);
        assert_eq!(screen.get_line(1), Some(" HZD            "));
    }
}
