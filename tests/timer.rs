#[cfg(test)]
mod tests {
    use lapclock::libs::lap::LapPace;
    use lapclock::libs::timer::{Command, Outcome, Phase, TimerStateMachine};

    fn running_at(now: i64) -> TimerStateMachine {
        let mut timer = TimerStateMachine::new();
        assert_eq!(timer.start(now), Outcome::Started);
        timer
    }

    #[test]
    fn test_new_timer_is_stopped_and_empty() {
        let timer = TimerStateMachine::new();
        assert_eq!(timer.phase(), Phase::Stopped);
        assert_eq!(timer.elapsed(), 0);
        assert!(timer.laps().is_empty());
        assert_eq!(timer.round_counter(), 1);
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_two_laps_then_reset() {
        let mut timer = running_at(0);
        timer.set_title("Intervals");

        let first = timer.record_lap(1_500).unwrap();
        assert_eq!(first.round, 1);
        assert_eq!(first.timestamp, "00:01.500");
        assert_eq!(first.time_diff, 0.0);
        assert_eq!(first.lap_length, 1.5);
        assert_eq!(first.pace, LapPace::First);

        let second = timer.record_lap(3_200).unwrap();
        assert_eq!(second.round, 2);
        assert_eq!(second.timestamp, "00:03.200");
        assert_eq!(second.time_diff, 0.2);
        assert_eq!(second.lap_length, 1.7);
        assert_eq!(second.pace, LapPace::Slower);
        assert_eq!(second.describe(), "Round 2: 00:03.200 (+0.20s) [1.70s]");

        let request = timer.reset().unwrap();
        assert_eq!(request.laps.len(), 2);
        assert_eq!(request.start_epoch, 0);
        assert_eq!(request.title, "Intervals");

        assert_eq!(timer.phase(), Phase::Stopped);
        assert_eq!(timer.elapsed(), 0);
        assert!(timer.laps().is_empty());
        assert_eq!(timer.round_counter(), 1);
        assert_eq!(timer.title(), "Intervals");
    }

    #[test]
    fn test_faster_lap_has_negative_diff() {
        let mut timer = running_at(0);
        timer.record_lap(2_000);
        let second = timer.record_lap(3_700).unwrap();
        assert_eq!(second.time_diff, -0.3);
        assert_eq!(second.pace, LapPace::Faster);
        assert_eq!(second.describe(), "Round 2: 00:03.700 (-0.30s) [1.70s]");
    }

    #[test]
    fn test_slightly_faster_lap_keeps_minus_sign() {
        let mut timer = running_at(0);
        timer.record_lap(2_000);
        let second = timer.record_lap(3_996).unwrap();
        assert_eq!(second.duration_ms, 1_996);
        assert_eq!(second.pace, LapPace::Faster);
        assert_eq!(second.lap_length, 2.0);
        assert_eq!(second.describe(), "Round 2: 00:03.996 (-0.00s) [2.00s]");
    }

    #[test]
    fn test_equal_lap_counts_as_slower() {
        let mut timer = running_at(0);
        timer.record_lap(1_000);
        let second = timer.record_lap(2_000).unwrap();
        assert_eq!(second.time_diff, 0.0);
        assert_eq!(second.pace, LapPace::Slower);
        assert_eq!(second.describe(), "Round 2: 00:02.000 (+0.00s) [1.00s]");
    }

    #[test]
    fn test_round_counter_tracks_lap_count() {
        let mut timer = running_at(0);
        for (i, now) in [500, 1_100, 1_900, 2_000].into_iter().enumerate() {
            timer.record_lap(now);
            assert_eq!(timer.round_counter() as usize, timer.laps().len() + 1);
            assert_eq!(timer.laps()[i].round as usize, i + 1);
        }
    }

    #[test]
    fn test_pause_excludes_paused_time() {
        let mut timer = running_at(0);
        assert_eq!(timer.pause(1_000), Outcome::Paused);
        assert_eq!(timer.phase(), Phase::Paused);
        assert_eq!(timer.elapsed(), 1_000);
        assert!(!timer.is_ticking());

        assert_eq!(timer.pause(5_000), Outcome::Resumed);
        assert_eq!(timer.start_epoch(), 4_000);
        assert_eq!(timer.tick(5_500), 1_500);

        // The lap in progress does not include the pause either.
        let lap = timer.record_lap(6_000).unwrap();
        assert_eq!(lap.duration_ms, 2_000);
        assert_eq!(lap.timestamp, "00:02.000");
    }

    #[test]
    fn test_lap_ignored_unless_running() {
        let mut timer = TimerStateMachine::new();
        assert!(timer.record_lap(100).is_none());
        assert_eq!(timer.dispatch(Command::Lap, 100), Outcome::Ignored);

        timer.start(0);
        timer.pause(500);
        assert!(timer.record_lap(700).is_none());
        assert!(timer.laps().is_empty());
    }

    #[test]
    fn test_pause_ignored_while_stopped() {
        let mut timer = TimerStateMachine::new();
        assert_eq!(timer.pause(100), Outcome::Ignored);
        assert_eq!(timer.phase(), Phase::Stopped);
    }

    #[test]
    fn test_stop_and_restart_keeps_elapsed() {
        let mut timer = running_at(1_000);
        assert_eq!(timer.start(3_000), Outcome::Stopped);
        assert_eq!(timer.elapsed(), 2_000);
        assert_eq!(timer.tick(10_000), 2_000);

        assert_eq!(timer.start(10_000), Outcome::Started);
        assert_eq!(timer.start_epoch(), 8_000);
        assert_eq!(timer.tick(10_500), 2_500);
    }

    #[test]
    fn test_restart_moves_lap_boundary_to_logical_start() {
        let mut timer = running_at(0);
        timer.record_lap(1_000);
        timer.start(2_000);
        timer.start(5_000);
        let lap = timer.record_lap(5_500).unwrap();
        assert_eq!(lap.duration_ms, 2_500);
    }

    #[test]
    fn test_stop_while_paused_freezes_elapsed() {
        let mut timer = running_at(0);
        timer.pause(1_200);
        assert_eq!(timer.start(4_000), Outcome::Stopped);
        assert_eq!(timer.phase(), Phase::Stopped);
        assert_eq!(timer.elapsed(), 1_200);
    }

    #[test]
    fn test_reset_without_laps_returns_nothing() {
        let mut timer = running_at(0);
        timer.tick(800);
        assert_eq!(timer.dispatch(Command::Reset, 900), Outcome::Reset(None));
        assert_eq!(timer.elapsed(), 0);
        assert_eq!(timer.phase(), Phase::Stopped);
    }

    #[test]
    fn test_dispatch_routes_commands() {
        let mut timer = TimerStateMachine::new();
        assert_eq!(timer.dispatch(Command::StartStop, 0), Outcome::Started);
        assert_eq!(timer.dispatch(Command::PauseResume, 100), Outcome::Paused);
        assert_eq!(timer.dispatch(Command::PauseResume, 200), Outcome::Resumed);
        assert!(matches!(timer.dispatch(Command::Lap, 300), Outcome::Lap(ref lap) if lap.duration_ms == 200));
        assert!(matches!(timer.dispatch(Command::Reset, 400), Outcome::Reset(Some(_))));
    }
}
