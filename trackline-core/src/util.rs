/// Convert a number of seconds to a string in the format "HH:MM:SS".
/// If the number of hours is 0, it will be omitted.
pub fn seconds_to_hms_string(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Formats a playlist total, splitting whole days off the front once the
/// total reaches a day: "2 days 3:04:05".
pub fn seconds_to_total_string(seconds: u32) -> String {
    const DAY: u32 = 24 * 3600;
    let days = seconds / DAY;
    let rest = seconds % DAY;
    match days {
        0 => seconds_to_hms_string(rest),
        1 => format!("1 day {}", hms_with_hours(rest)),
        _ => format!("{days} days {}", hms_with_hours(rest)),
    }
}

fn hms_with_hours(seconds: u32) -> String {
    format!(
        "{}:{:02}:{:02}",
        seconds / 3600,
        (seconds % 3600) / 60,
        seconds % 60
    )
}
