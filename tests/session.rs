#[cfg(test)]
mod tests {
    use console::Key;
    use lapclock::libs::config::{Preferences, Theme};
    use lapclock::libs::keymap::Action;
    use lapclock::libs::session::{Job, JobDone, Session};
    use lapclock::libs::terminal::KeyEvent;
    use lapclock::libs::timer::{Command, Phase};
    use std::path::PathBuf;

    fn session() -> Session {
        Session::new(Preferences::default(), None)
    }

    fn press(session: &mut Session, c: char, now: i64) -> Option<Job> {
        session.on_key(KeyEvent::Press(Key::Char(c)), now)
    }

    #[test]
    fn test_title_argument_overrides_preference() {
        let prefs = Preferences {
            title: Some("Saved".to_string()),
            ..Default::default()
        };
        assert_eq!(Session::new(prefs.clone(), None).timer().title(), "Saved");
        assert_eq!(Session::new(prefs, Some("Race".to_string())).timer().title(), "Race");
    }

    #[test]
    fn test_keys_drive_the_timer() {
        let mut session = session();
        assert_eq!(press(&mut session, ' ', 0), None);
        assert_eq!(session.timer().phase(), Phase::Running);

        assert_eq!(press(&mut session, 'a', 1_500), None);
        assert_eq!(press(&mut session, 'b', 3_200), None);
        assert_eq!(session.timer().laps().len(), 2);

        press(&mut session, 'p', 4_000);
        assert_eq!(session.timer().phase(), Phase::Paused);
    }

    #[test]
    fn test_ctrl_c_requests_quit_without_lap() {
        let mut session = session();
        press(&mut session, ' ', 0);
        assert_eq!(session.on_key(KeyEvent::Press(Key::CtrlC), 100), None);
        assert!(session.is_quit_requested());
        assert!(session.timer().laps().is_empty());
    }

    #[test]
    fn test_reset_with_laps_starts_export() {
        let mut session = session();
        session.on_action(Action::Timer(Command::StartStop), 0);
        session.on_action(Action::Timer(Command::Lap), 1_500);

        match session.on_action(Action::Timer(Command::Reset), 2_000) {
            Some(Job::Export(request)) => assert_eq!(request.laps.len(), 1),
            other => panic!("unexpected job: {:?}", other),
        }
        assert!(session.is_prompt_active());
        assert!(session.keymap().is_focused());
        assert!(session.timer().laps().is_empty());

        // Keys are swallowed until the export reports back.
        assert_eq!(press(&mut session, ' ', 2_500), None);
        assert_eq!(session.timer().phase(), Phase::Stopped);

        session.on_job_done(JobDone::Exported(Ok(Some(PathBuf::from("laps.csv")))));
        assert!(!session.is_prompt_active());
        assert!(!session.keymap().is_focused());
    }

    #[test]
    fn test_reset_without_laps_starts_nothing() {
        let mut session = session();
        session.on_action(Action::Timer(Command::StartStop), 0);
        assert_eq!(session.on_action(Action::Timer(Command::Reset), 1_000), None);
        assert!(!session.is_prompt_active());
    }

    #[test]
    fn test_failed_export_releases_prompt() {
        let mut session = session();
        session.on_action(Action::Timer(Command::StartStop), 0);
        session.on_action(Action::Timer(Command::Lap), 500);
        session.on_action(Action::Timer(Command::Reset), 600);

        session.on_job_done(JobDone::Exported(Err(anyhow::anyhow!("disk full"))));
        assert!(!session.is_prompt_active());
        assert!(session.timer().laps().is_empty());
    }

    #[test]
    fn test_title_edit() {
        let mut session = session();
        assert_eq!(session.on_key(KeyEvent::Press(Key::Tab), 0), Some(Job::EditTitle(String::new())));
        assert!(session.is_prompt_active());

        // Enter in the prompt does not release focus before the job finishes.
        assert_eq!(session.on_key(KeyEvent::Press(Key::Enter), 10), None);
        assert!(session.keymap().is_focused());

        session.on_job_done(JobDone::TitleEdited(Ok("  Hill repeats ".to_string())));
        assert_eq!(session.timer().title(), "Hill repeats");
        assert!(!session.keymap().is_focused());
    }

    #[test]
    fn test_preferences_edit_and_apply() {
        let prefs = Preferences {
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        let mut session = Session::new(prefs.clone(), None);
        assert_eq!(session.on_key(KeyEvent::Press(Key::BackTab), 0), Some(Job::EditPreferences(prefs)));

        session.on_job_done(JobDone::PreferencesEdited(Ok(())));
        assert!(!session.is_prompt_active());

        let updated = Preferences {
            title: Some("Morning".to_string()),
            theme: Some(Theme::Light),
            font: None,
        };
        session.apply_preferences(updated.clone());
        assert_eq!(session.preferences(), &updated);
        assert_eq!(session.timer().title(), "Morning");
    }

    #[test]
    fn test_cleared_preference_title_is_not_exported() {
        let saved = Preferences {
            title: Some("Morning".to_string()),
            ..Default::default()
        };
        let mut session = Session::new(saved, None);
        session.apply_preferences(Preferences::default());
        assert_eq!(session.timer().title(), "");

        session.on_action(Action::Timer(Command::StartStop), 0);
        session.on_action(Action::Timer(Command::Lap), 500);
        match session.on_action(Action::Timer(Command::Reset), 600) {
            Some(Job::Export(request)) => assert_eq!(request.title, ""),
            other => panic!("unexpected job: {:?}", other),
        }
    }

    #[test]
    fn test_cleared_preference_title_falls_back_to_session_title() {
        let mut session = Session::new(Preferences::default(), Some("Race".to_string()));
        session.apply_preferences(Preferences {
            title: Some("Morning".to_string()),
            ..Default::default()
        });
        assert_eq!(session.timer().title(), "Morning");

        session.apply_preferences(Preferences::default());
        assert_eq!(session.timer().title(), "Race");
    }

    #[test]
    fn test_escape_closes_help() {
        let mut session = session();
        assert_eq!(press(&mut session, '/', 0), None);
        assert!(session.keymap().is_help_open());

        assert_eq!(session.on_key(KeyEvent::Press(Key::Escape), 10), None);
        assert!(!session.keymap().is_help_open());
        // Escape with help closed neither records a lap nor reopens help.
        press(&mut session, ' ', 20);
        assert_eq!(session.on_key(KeyEvent::Press(Key::Escape), 30), None);
        assert!(session.timer().laps().is_empty());
        assert!(!session.keymap().is_help_open());
    }

    #[test]
    fn test_tick_updates_elapsed() {
        let mut session = session();
        press(&mut session, ' ', 0);
        session.on_tick(750);
        assert_eq!(session.timer().elapsed(), 750);
    }
}
