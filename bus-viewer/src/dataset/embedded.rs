//! Built-in routes used when the dataset source is unavailable.

use crate::domain::{Route, RouteId, Stop};

/// The four default routes, all terminating at Nitte Campus.
pub fn embedded_routes() -> Vec<Route> {
    vec![
        route(
            1,
            "Bus 1",
            ("Mangalore", "Nitte"),
            ("7:00 AM", "8:30 AM"),
            vec![
                Stop::new(1, "Mangalore Bus Stand", "7:00", "7:05"),
                Stop::new(2, "Surathkal", "7:30", "7:32"),
                Stop::new(3, "Nitte Campus", "8:30", "8:30"),
            ],
        ),
        route(
            2,
            "Bus 2",
            ("Udupi", "Nitte"),
            ("6:45 AM", "8:15 AM"),
            vec![
                Stop::new(1, "Udupi Bus Stand", "6:45", "6:50"),
                Stop::new(2, "Kundapura", "7:30", "7:32"),
                Stop::new(3, "Nitte Campus", "8:15", "8:15"),
            ],
        ),
        route(
            3,
            "Bus 3",
            ("Moodbidri", "Nitte"),
            ("7:15 AM", "8:45 AM"),
            vec![
                Stop::new(1, "Moodbidri", "7:15", "7:20"),
                Stop::new(2, "Karkala", "7:50", "7:52"),
                Stop::new(3, "Nitte Campus", "8:45", "8:45"),
            ],
        ),
        route(
            4,
            "Bus 4",
            ("Belthangadi", "Nitte"),
            ("6:30 AM", "8:00 AM"),
            vec![
                Stop::new(1, "Belthangadi Bus Stand", "6:30", "6:35"),
                Stop::new(2, "Sullia", "7:10", "7:12"),
                Stop::new(3, "Nitte Campus", "8:00", "8:00"),
            ],
        ),
    ]
}

fn route(
    id: i64,
    name: &str,
    (from, to): (&str, &str),
    (depart, arrive): (&str, &str),
    stops: Vec<Stop>,
) -> Route {
    Route {
        id: RouteId(id),
        name: name.to_string(),
        from: from.to_string(),
        to: to.to_string(),
        time: "1 hr 30 min".to_string(),
        depart: depart.to_string(),
        arrive: arrive.to_string(),
        stops,
    }
}
