mod tests {
    use drone_r6_core::color::BLUE;
    use drone_r6_core::{Animation, ControlCommand, ControlData, ControlError, SystemState};

    #[test]
    fn test_parse_routes() {
        assert_eq!(ControlCommand::parse("/con", ""), Ok(ControlCommand::Connect));
        assert_eq!(ControlCommand::parse("/dis", ""), Ok(ControlCommand::Disconnect));
        assert_eq!(
            ControlCommand::parse("/mov", "X=10&Y=-20&L=0&R=5"),
            Ok(ControlCommand::Move(ControlData::new(10, -20, 0, 5)))
        );
        assert_eq!(
            ControlCommand::parse("/led", "color=2"),
            Ok(ControlCommand::SetColor(2))
        );
        assert_eq!(
            ControlCommand::parse("/str", ""),
            Err(ControlError::UnknownRoute)
        );
    }

    #[test]
    fn test_parameters_in_any_order() {
        assert_eq!(
            ControlCommand::parse("/mov", "R=1&L=0&Y=3&X=-4&extra=1"),
            Ok(ControlCommand::Move(ControlData::new(-4, 3, 0, 1)))
        );
    }

    #[test]
    fn test_missing_and_invalid_parameters() {
        assert_eq!(
            ControlCommand::parse("/mov", "X=10&Y=20&L=0"),
            Err(ControlError::MissingParameter("R"))
        );
        assert_eq!(
            ControlCommand::parse("/mov", "X=ten&Y=20&L=0&R=0"),
            Err(ControlError::InvalidParameter("X"))
        );
        assert_eq!(
            ControlCommand::parse("/mov", "X=10&Y=20&L=300&R=0"),
            Err(ControlError::InvalidParameter("L"))
        );
        assert_eq!(
            ControlCommand::parse("/led", ""),
            Err(ControlError::MissingParameter("color"))
        );
    }

    #[test]
    fn test_opposite_steering_is_dropped() {
        let Ok(ControlCommand::Move(data)) = ControlCommand::parse("/mov", "X=0&Y=50&L=20&R=30")
        else {
            panic!("expected move command");
        };
        assert_eq!((data.l, data.r), (0, 0));
        assert_eq!(data.y, 50);
    }

    #[test]
    fn test_dispatch_updates_shared_state() {
        let system = SystemState::new();

        system.dispatch(ControlCommand::Connect);
        assert_eq!(system.animation.get(), Animation::Idle);

        system.dispatch(ControlCommand::Move(ControlData::new(0, 40, 0, 0)));
        assert_eq!(system.motion.get(), ControlData::new(0, 40, 0, 0));

        system.dispatch(ControlCommand::SetColor(2));
        assert!(system.colors.theme().same_rgb(BLUE));
        assert_eq!(system.animation.get(), Animation::Idle);

        system.dispatch(ControlCommand::Disconnect);
        assert_eq!(system.animation.get(), Animation::None);
        assert_eq!(system.motion.get(), ControlData::default());
    }
}
