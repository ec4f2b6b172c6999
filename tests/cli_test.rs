#[cfg(feature = "std")]
#[cfg(test)]
mod cli_tests {
    use fleet_command::{
        coord_to_string, describe_captain, describe_shot, init_logging_with, parse_coord,
        parse_orientation, render_grid, Captain, CaptainKind, Grid, Orientation, Position,
        ShotResult,
    };

    #[test]
    fn test_parse_coord_accepts_board_squares() {
        assert_eq!(parse_coord("A1").unwrap(), Position::new(0, 0));
        assert_eq!(parse_coord("j10").unwrap(), Position::new(9, 9));
        assert_eq!(parse_coord("  c4 ").unwrap(), Position::new(3, 2));
    }

    #[test]
    fn test_parse_coord_rejects_garbage() {
        for input in ["", "A", "K1", "A0", "A11", "1A", "Ax"] {
            assert!(parse_coord(input).is_err(), "{} should be rejected", input);
        }
    }

    #[test]
    fn test_coord_labels_roundtrip() {
        for r in 0..10 {
            for c in 0..10 {
                let pos = Position::new(r, c);
                assert_eq!(parse_coord(&coord_to_string(pos)).unwrap(), pos);
            }
        }
    }

    #[test]
    fn test_parse_orientation() {
        assert_eq!(parse_orientation("h").unwrap(), Orientation::Horizontal);
        assert_eq!(parse_orientation("Vertical").unwrap(), Orientation::Vertical);
        assert!(parse_orientation("d").is_err());
    }

    #[test]
    fn test_render_grid_layout() {
        let mut grid = Grid::new();
        grid.place_new_ship(2, Position::new(0, 0), Orientation::Horizontal)
            .unwrap();
        grid.receive_shot(Position::new(0, 0));
        grid.receive_shot(Position::new(9, 9));

        let own = render_grid(&grid.project(false));
        let lines: Vec<&str> = own.lines().collect();
        assert_eq!(lines.len(), 11);
        assert!(lines[0].contains("A B C D E F G H I J"));
        assert!(lines[1].contains("X S"));
        assert!(lines[10].ends_with('o'));

        let enemy = render_grid(&grid.project(true));
        assert!(!enemy.contains('S'));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(describe_shot(&ShotResult::miss(Position::new(1, 1))), "B2: miss");
        let captain = Captain::new(CaptainKind::Gunner);
        assert_eq!(describe_captain(&captain), "Gunner: charging 0/4");
    }

    #[test]
    fn test_logging_can_be_installed_twice() {
        init_logging_with(log::LevelFilter::Warn);
        init_logging_with(log::LevelFilter::Warn);
    }
}
