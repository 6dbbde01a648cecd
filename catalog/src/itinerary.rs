use crate::model::{Highlight, ItineraryDay};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Middle-day templates for tours that carry no highlights of their own.
pub fn default_highlights() -> Vec<Highlight> {
    vec![
        Highlight {
            title: "Guided Sightseeing".into(),
            details: strings(&["Guided activity with a local expert.", "Key landmarks and photo stops.", "Afternoon at leisure."]),
        },
        Highlight {
            title: "Local Flavours".into(),
            details: strings(&["Market visit and tasting.", "Local food stop for lunch.", "Evening dinner suggestions."]),
        },
        Highlight {
            title: "Scenic Exploration".into(),
            details: strings(&["Scenic drive or easy walk.", "Viewpoints and photo spots.", "Return to hotel for the night."]),
        },
    ]
}

fn arrival_only() -> ItineraryDay {
    ItineraryDay {
        day: 1,
        title: "Arrival".into(),
        subtitle: Some("Welcome".into()),
        details: strings(&["Airport pickup / self check-in.", "Free time to rest or explore nearby area."]),
    }
}

fn arrival() -> ItineraryDay {
    ItineraryDay {
        day: 1,
        title: "Arrival & Orientation".into(),
        subtitle: Some("Welcome!".into()),
        details: strings(&[
            "Arrive at destination airport and transfer to hotel.",
            "Hotel check-in and short orientation walk nearby.",
            "Evening at leisure / welcome dinner suggestions.",
        ]),
    }
}

fn departure(day: u32) -> ItineraryDay {
    ItineraryDay {
        day,
        title: "Departure".into(),
        subtitle: Some("See you again!".into()),
        details: strings(&[
            "Free time (depending on flight time).",
            "Hotel check-out and transfer to airport.",
            "End of service.",
        ]),
    }
}

/// Build a day-by-day itinerary: arrival first, departure last, and the days in
/// between cycling through `highlights` in order. Deterministic for a given input.
/// Falls back to [`default_highlights`] when `highlights` is empty.
pub fn build_itinerary(duration_days: u32, highlights: &[Highlight]) -> Vec<ItineraryDay> {
    if duration_days < 2 {
        return vec![arrival_only()];
    }
    let fallback;
    let templates = if highlights.is_empty() {
        fallback = default_highlights();
        &fallback[..]
    } else {
        highlights
    };

    let mut days = Vec::with_capacity(duration_days as usize);
    days.push(arrival());
    for i in 0..(duration_days - 2) {
        let h = &templates[i as usize % templates.len()];
        days.push(ItineraryDay { day: i + 2, title: h.title.clone(), subtitle: None, details: h.details.clone() });
    }
    days.push(departure(duration_days));
    days
}
