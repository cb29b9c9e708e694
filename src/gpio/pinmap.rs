//! Physical-to-chip pin maps for the three known board revisions.
//!
//! Each table is indexed by physical header position (1..=40, position 0 is
//! an unused placeholder) and holds the chip (BCM) pin wired to that
//! position, or `-1` where the position carries power, ground, or nothing.
//! Physical position 3, for instance, is BCM 0 on a Rev1 board but BCM 2 on
//! Rev2 and Rev3; keeping the tables here keeps revision conditionals out of
//! the operational code.

use super::{BoardRevision, GpioError, NumberingMode};

/// Sentinel for "no chip pin at this physical position".
pub const NO_BCM_PIN: i8 = -1;

#[rustfmt::skip]
const PIN_TO_BCM_REV1: [i8; 41] = [
    -1, -1, -1,  0, -1,  1, -1,  4, 14, -1,
    15, 17, 18, 21, -1, 22, 23, -1, 24, 10,
    -1,  9, 25, 11,  8, -1,  7, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1,
];

#[rustfmt::skip]
const PIN_TO_BCM_REV2: [i8; 41] = [
    -1, -1, -1,  2, -1,  3, -1,  4, 14, -1,
    15, 17, 18, 27, -1, 22, 23, -1, 24, 10,
    -1,  9, 25, 11,  8, -1,  7, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1,
];

#[rustfmt::skip]
const PIN_TO_BCM_REV3: [i8; 41] = [
    -1, -1, -1,  2, -1,  3, -1,  4, 14, -1,
    15, 17, 18, 27, -1, 22, 23, -1, 24, 10,
    -1,  9, 25, 11,  8, -1,  7, -1, -1,  5,
    -1,  6, 12, 13, -1, 19, 16, 26, 20, -1,
    21,
];

/// Pin map for the given revision.
pub fn revision_map(revision: BoardRevision) -> &'static [i8; 41] {
    match revision {
        BoardRevision::Rev1 => &PIN_TO_BCM_REV1,
        BoardRevision::Rev2 => &PIN_TO_BCM_REV2,
        BoardRevision::Rev3 => &PIN_TO_BCM_REV3,
    }
}

/// Looks up the chip pin behind a physical header position.
///
/// Returns [`NO_BCM_PIN`] for positions with no chip pin; fails only when
/// the position is outside the header entirely.
pub fn board_to_bcm(revision: BoardRevision, pin: i64) -> Result<i64, GpioError> {
    let map = revision_map(revision);
    let index = usize::try_from(pin)
        .ok()
        .filter(|&i| i < map.len())
        .ok_or(GpioError::InvalidPin { pin })?;
    Ok(i64::from(map[index]))
}

/// Finds the physical header position carrying a chip pin.
///
/// Fails when no position on this revision carries `pin`; the sentinel is
/// rejected up front so a `-1` can never round-trip into a "valid" position.
pub fn bcm_to_board(revision: BoardRevision, pin: i64) -> Result<i64, GpioError> {
    if pin < 0 {
        return Err(GpioError::InvalidPin { pin });
    }
    revision_map(revision)
        .iter()
        .position(|&bcm| i64::from(bcm) == pin)
        .map(|index| index as i64)
        .ok_or(GpioError::InvalidPin { pin })
}

/// Translates a configured pin number into the driver's numbering scheme.
///
/// Identity when the configured scheme matches the driver's. When either
/// scheme is not established yet the neutral sentinel `0` is returned;
/// callers must treat that as "do not touch hardware yet". A translation
/// that lands on an unmapped position fails rather than handing the driver
/// the `-1` sentinel.
pub fn resolve_pin(
    revision: BoardRevision,
    driver_mode: Option<NumberingMode>,
    configured_mode: Option<NumberingMode>,
    pin: i64,
) -> Result<i64, GpioError> {
    match (driver_mode, configured_mode) {
        (Some(driver), Some(configured)) if driver == configured => Ok(pin),
        (Some(NumberingMode::Board), Some(NumberingMode::Bcm)) => bcm_to_board(revision, pin),
        (Some(NumberingMode::Bcm), Some(NumberingMode::Board)) => {
            let bcm = board_to_bcm(revision, pin)?;
            if bcm == i64::from(NO_BCM_PIN) {
                return Err(GpioError::InvalidPin { pin });
            }
            Ok(bcm)
        }
        _ => Ok(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REVISIONS: [BoardRevision; 3] = [
        BoardRevision::Rev1,
        BoardRevision::Rev2,
        BoardRevision::Rev3,
    ];

    #[test]
    fn test_round_trip_all_mapped_positions() {
        for revision in REVISIONS {
            for position in 0..41 {
                let bcm = board_to_bcm(revision, position).unwrap();
                if bcm != i64::from(NO_BCM_PIN) {
                    assert_eq!(bcm_to_board(revision, bcm).unwrap(), position);
                }
            }
        }
    }

    #[test]
    fn test_sentinel_never_resolves_to_a_position() {
        for revision in REVISIONS {
            assert_eq!(
                bcm_to_board(revision, -1),
                Err(GpioError::InvalidPin { pin: -1 })
            );
        }
    }

    #[test]
    fn test_board_to_bcm_out_of_range() {
        assert!(board_to_bcm(BoardRevision::Rev3, 41).is_err());
        assert!(board_to_bcm(BoardRevision::Rev3, -3).is_err());
    }

    #[test]
    fn test_rev3_header_position_12_is_bcm_18() {
        assert_eq!(board_to_bcm(BoardRevision::Rev3, 12).unwrap(), 18);
    }

    #[test]
    fn test_sda_position_differs_across_revisions() {
        assert_eq!(board_to_bcm(BoardRevision::Rev1, 3).unwrap(), 0);
        assert_eq!(board_to_bcm(BoardRevision::Rev2, 3).unwrap(), 2);
        assert_eq!(board_to_bcm(BoardRevision::Rev3, 3).unwrap(), 2);
    }

    #[test]
    fn test_resolve_identity_when_modes_match() {
        for revision in REVISIONS {
            for pin in 0..41 {
                for mode in [NumberingMode::Board, NumberingMode::Bcm] {
                    assert_eq!(
                        resolve_pin(revision, Some(mode), Some(mode), pin).unwrap(),
                        pin
                    );
                }
            }
        }
    }

    #[test]
    fn test_resolve_translates_board_config_to_bcm_driver() {
        let resolved = resolve_pin(
            BoardRevision::Rev3,
            Some(NumberingMode::Bcm),
            Some(NumberingMode::Board),
            12,
        );
        assert_eq!(resolved.unwrap(), 18);
    }

    #[test]
    fn test_resolve_translates_bcm_config_to_board_driver() {
        let resolved = resolve_pin(
            BoardRevision::Rev3,
            Some(NumberingMode::Board),
            Some(NumberingMode::Bcm),
            18,
        );
        assert_eq!(resolved.unwrap(), 12);
    }

    #[test]
    fn test_resolve_rejects_unmapped_position() {
        // Physical 6 is a ground pin on every revision.
        let resolved = resolve_pin(
            BoardRevision::Rev3,
            Some(NumberingMode::Bcm),
            Some(NumberingMode::Board),
            6,
        );
        assert_eq!(resolved, Err(GpioError::InvalidPin { pin: 6 }));
    }

    #[test]
    fn test_resolve_without_driver_mode_is_neutral() {
        let resolved = resolve_pin(BoardRevision::Rev3, None, Some(NumberingMode::Board), 12);
        assert_eq!(resolved.unwrap(), 0);
    }
}
