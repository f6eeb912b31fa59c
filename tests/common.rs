// False positive
#[allow(unused)]
pub use self::{maps::*, mods::*};

/// Bit values for mods
mod mods {
    #![allow(unused)]

    pub const NM: u32 = 0;
    pub const NF: u32 = 1 << 0;
    pub const EZ: u32 = 1 << 1;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const DT: u32 = 1 << 6;
    pub const HT: u32 = 1 << 8;
    pub const NC: u32 = 1 << 9;
    pub const FL: u32 = 1 << 10;
    pub const SO: u32 = 1 << 12;
}

/// Synthetic beatmaps
mod maps {
    #![allow(unused)]

    use rosu_tp::{
        model::hit_object::{HitObject, Pos},
        Beatmap,
    };

    /// Alternating jumps across the playfield.
    pub fn jumps(n_objects: u32, interval: f64, spacing: f64) -> Beatmap {
        Beatmap::builder()
            .ar(9.3)
            .od(8.8)
            .cs(4.0)
            .hp(5.0)
            .hit_objects((0..n_objects).map(|i| {
                let offset = if i % 2 == 0 { -spacing } else { spacing };
                let x = 256.0 + offset / 2.0;
                let y = 162.0 + f64::from(i % 3) * 30.0;

                HitObject::circle(Pos::new(x, y), 1000.0 + f64::from(i) * interval)
            }))
            .build()
    }

    /// Bursts of sixteen notes on a circular path with pauses in between.
    pub fn streams(n_objects: u32, interval: f64) -> Beatmap {
        let mut time = 1000.0;

        Beatmap::builder()
            .ar(9.0)
            .od(8.0)
            .cs(4.2)
            .hit_objects((0..n_objects).map(|i| {
                let angle = f64::from(i) * 0.4;
                let pos = Pos::new(256.0 + 60.0 * angle.cos(), 192.0 + 60.0 * angle.sin());
                let h = HitObject::circle(pos, time);

                time += if i % 16 == 15 { interval * 4.0 } else { interval };

                h
            }))
            .build()
    }

    /// Circles and sliders with a spinner in the middle.
    pub fn mixed(n_objects: u32) -> Beatmap {
        let mut time = 500.0;
        let mut hit_objects = Vec::with_capacity(n_objects as usize + 1);

        for i in 0..n_objects {
            let x = 80.0 + f64::from((i * 97) % 350);
            let y = 60.0 + f64::from((i * 53) % 260);
            let pos = Pos::new(x, y);

            if i % 5 == 3 {
                let end_time = time + 200.0;
                let end_pos = Pos::new(x + 50.0, y + 20.0);
                hit_objects.push(HitObject::slider(pos, time, end_time, end_pos, 2 + i % 3));
                time = end_time + 150.0;
            } else {
                hit_objects.push(HitObject::circle(pos, time));
                time += 220.0;
            }

            if i == n_objects / 2 {
                let center = Pos::new(256.0, 192.0);
                hit_objects.push(HitObject::spinner(center, time, time + 2000.0));
                time += 2500.0;
            }
        }

        Beatmap::builder()
            .ar(8.5)
            .od(7.0)
            .cs(4.5)
            .hp(6.0)
            .hit_objects(hit_objects)
            .build()
    }
}

#[track_caller]
#[allow(unused)]
pub fn assert_eq_float<F: Float>(a: F, b: F) {
    assert!((a - b).abs() < F::EPSILON, "{a} != {b}")
}

#[track_caller]
#[allow(unused)]
pub fn assert_approx<F: Float>(a: F, b: F, tolerance: F) {
    assert!((a - b).abs() < tolerance, "{a} != {b} (tolerance {tolerance})")
}

/// Trait to provide flexibility in the `assert_eq_float` function.
pub trait Float:
    Copy + std::fmt::Display + std::ops::Sub<Output = Self> + PartialOrd + Sized
{
    const EPSILON: Self;

    fn abs(self) -> Self;
}

macro_rules! impl_float {
    ( $( $ty:ty )* ) => {
        $(
            impl Float for $ty {
                const EPSILON: Self = Self::EPSILON;

                fn abs(self) -> Self {
                    self.abs()
                }
            }
        )*
    }
}

impl_float!(f32 f64);

/// Install a subscriber that writes into the test output.
#[allow(unused)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
