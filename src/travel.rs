use crate::util::lerp;

/// km/s when stability is empty.
const MIN_SPEED: f64 = 100.0;
/// km/s when stability is full.
const MAX_SPEED: f64 = 1500.0;
const MEGAMETRE: f64 = 1_000_000.0;

/// Distance travelled during a session. Speed grows with the square of the
/// stability fraction, so staying steady pays off quickly.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TravelLog {
    distance_km: f64,
}

impl TravelLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speed_for(fraction: f64) -> f64 {
        lerp(MIN_SPEED, MAX_SPEED, fraction.powi(2))
    }

    pub fn advance(&mut self, fraction: f64, dt: f64) {
        if dt > 0.0 {
            self.distance_km += Self::speed_for(fraction) * dt;
        }
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }
}

pub fn format_distance(km: f64) -> String {
    if km >= MEGAMETRE {
        format!("{:.2} Mm", km / MEGAMETRE)
    } else {
        format!("{} km", group_thousands(km.round() as u64))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_curve() {
        assert_eq!(TravelLog::speed_for(0.0), 100.0);
        assert_eq!(TravelLog::speed_for(1.0), 1500.0);
        assert_eq!(TravelLog::speed_for(0.5), 450.0);
    }

    #[test]
    fn advance_integrates_speed() {
        let mut log = TravelLog::new();
        log.advance(1.0, 2.0);
        log.advance(0.0, 1.0);
        assert_eq!(log.distance_km(), 3100.0);
    }

    #[test]
    fn ignores_non_positive_dt() {
        let mut log = TravelLog::new();
        log.advance(1.0, 0.0);
        log.advance(1.0, -1.0);
        assert_eq!(log.distance_km(), 0.0);
    }

    #[test]
    fn formats_kilometres() {
        assert_eq!(format_distance(0.0), "0 km");
        assert_eq!(format_distance(999.4), "999 km");
        assert_eq!(format_distance(123_456.0), "123,456 km");
    }

    #[test]
    fn formats_megametres() {
        assert_eq!(format_distance(1_000_000.0), "1.00 Mm");
        assert_eq!(format_distance(2_345_678.0), "2.35 Mm");
    }
}
