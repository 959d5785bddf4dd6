use std::fmt;
use std::str::FromStr;

use mission_csv::Row;

use crate::column::parse;
use crate::Result;

// Mission settings enumerations: CSV cells hold either the numeric code or
// the lower-case name.
macro_rules! coded_enum {
    ($name:ident { $($variant:ident = $code:literal => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn code(self) -> u8 {
                match self { $(Self::$variant => $code),+ }
            }

            pub fn name(self) -> &'static str {
                match self { $(Self::$variant => $text),+ }
            }
        }

        impl FromStr for $name {
            type Err = ();

            fn from_str(s: &str) -> std::result::Result<Self, ()> {
                let s = s.trim();
                $(
                    if s == $text || s.parse::<u8>() == Ok($code) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

coded_enum!(FinishAction {
    NoAction = 0 => "no_action",
    ReturnHome = 1 => "return_home",
    AutoLand = 2 => "auto_land",
    BackToFirst = 3 => "back_to_first",
    Infinite = 4 => "infinite",
});

coded_enum!(YawMode {
    Auto = 0 => "auto",
    Lock = 1 => "lock",
    Rc = 2 => "rc",
    Waypoint = 3 => "waypoint",
});

coded_enum!(TraceMode {
    Point = 0 => "point",
    Coordinated = 1 => "coordinated",
});

coded_enum!(RcLostAction {
    Free = 0 => "free",
    Continue = 1 => "continue",
});

coded_enum!(GimbalPitchMode {
    Free = 0 => "free",
    Auto = 1 => "auto",
});

/// Mission-wide settings, one CSV row:
/// `max_velocity_mps,idle_velocity_mps,finish_action,executive_times,yaw_mode,trace_mode,rc_lost_action,gimbal_pitch_mode`.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionInit {
    pub max_velocity_mps: f32,
    pub idle_velocity_mps: f32,
    pub finish_action: FinishAction,
    /// Times the route is flown.
    pub executive_times: u8,
    pub yaw_mode: YawMode,
    pub trace_mode: TraceMode,
    pub rc_lost_action: RcLostAction,
    pub gimbal_pitch_mode: GimbalPitchMode,
}

impl MissionInit {
    pub fn from_row(row: &Row, line: usize) -> Result<Self> {
        Ok(Self {
            max_velocity_mps: parse(row, line, 1, "max_velocity_mps")?,
            idle_velocity_mps: parse(row, line, 2, "idle_velocity_mps")?,
            finish_action: parse(row, line, 3, "finish_action")?,
            executive_times: parse(row, line, 4, "executive_times")?,
            yaw_mode: parse(row, line, 5, "yaw_mode")?,
            trace_mode: parse(row, line, 6, "trace_mode")?,
            rc_lost_action: parse(row, line, 7, "rc_lost_action")?,
            gimbal_pitch_mode: parse(row, line, 8, "gimbal_pitch_mode")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlanError;
    use std::io::Cursor;

    fn row(line: &str) -> Row {
        let mut row = Row::new();
        row.read_next_row(&mut Cursor::new(line)).unwrap();
        row
    }

    #[test]
    fn test_codes_and_names() {
        let a = MissionInit::from_row(&row("10,5,1,1,0,0,1,0\n"), 2).unwrap();
        let b = MissionInit::from_row(
            &row("10,5,return_home,1,auto,point,continue,free\n"),
            2,
        )
        .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.finish_action, FinishAction::ReturnHome);
        assert_eq!(a.rc_lost_action, RcLostAction::Continue);
        assert_eq!(a.max_velocity_mps, 10.0);
    }

    #[test]
    fn test_unknown_code() {
        let err = MissionInit::from_row(&row("10,5,9,1,0,0,1,0\n"), 3).unwrap_err();
        assert!(matches!(err, PlanError::InvalidValue { line: 3, column: 3, .. }));
    }

    #[test]
    fn test_round_trip_names() {
        for action in [
            FinishAction::NoAction,
            FinishAction::ReturnHome,
            FinishAction::AutoLand,
            FinishAction::BackToFirst,
            FinishAction::Infinite,
        ] {
            assert_eq!(action.name().parse::<FinishAction>(), Ok(action));
            assert_eq!(action.code().to_string().parse::<FinishAction>(), Ok(action));
        }
        assert_eq!(YawMode::Waypoint.to_string(), "waypoint");
    }
}
