use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

macro_rules! impl_mods {
    ($func_name:ident, $const_name:ident) => {
        #[inline]
        fn $func_name(self) -> bool {
            self & Self::$const_name > 0
        }
    };
}

/// Abstraction over bitflag gamemods.
///
/// Implemented for `u32` following the bit layout of the osu!api.
pub trait Mods: Copy {
    const NF: u32 = 1 << 0;
    const EZ: u32 = 1 << 1;
    const TD: u32 = 1 << 2;
    const HD: u32 = 1 << 3;
    const HR: u32 = 1 << 4;
    const SD: u32 = 1 << 5;
    const DT: u32 = 1 << 6;
    const RX: u32 = 1 << 7;
    const HT: u32 = 1 << 8;
    const NC: u32 = 1 << 9;
    const FL: u32 = 1 << 10;
    const AO: u32 = 1 << 11;
    const SO: u32 = 1 << 12;
    const AP: u32 = 1 << 13;
    const PF: u32 = 1 << 14;
    const CN: u32 = 1 << 22;
    const V2: u32 = 1 << 29;

    /// Whether the mods change the clock rate.
    fn change_speed(self) -> bool;
    /// Whether the mods change any of the map's stats.
    fn change_map(self) -> bool;
    /// The clock rate of the mods.
    fn clock_rate(self) -> f64;
    fn nf(self) -> bool;
    fn ez(self) -> bool;
    fn td(self) -> bool;
    fn hd(self) -> bool;
    fn hr(self) -> bool;
    fn sd(self) -> bool;
    /// Note that this is also `true` for NC.
    fn dt(self) -> bool;
    fn rx(self) -> bool;
    fn ht(self) -> bool;
    fn nc(self) -> bool;
    fn fl(self) -> bool;
    fn so(self) -> bool;
    fn pf(self) -> bool;
}

impl Mods for u32 {
    #[inline]
    fn change_speed(self) -> bool {
        self & (Self::HT | Self::DT | Self::NC) > 0
    }

    #[inline]
    fn change_map(self) -> bool {
        self.change_speed() || self & (Self::HR | Self::EZ) > 0
    }

    #[inline]
    fn clock_rate(self) -> f64 {
        if self.dt() {
            1.5
        } else if self.ht() {
            0.75
        } else {
            1.0
        }
    }

    #[inline]
    fn dt(self) -> bool {
        self & (Self::DT | Self::NC) > 0
    }

    impl_mods!(nf, NF);
    impl_mods!(ez, EZ);
    impl_mods!(td, TD);
    impl_mods!(hd, HD);
    impl_mods!(hr, HR);
    impl_mods!(sd, SD);
    impl_mods!(rx, RX);
    impl_mods!(ht, HT);
    impl_mods!(nc, NC);
    impl_mods!(fl, FL);
    impl_mods!(so, SO);
    impl_mods!(pf, PF);
}

/// Acronyms in ascending bit order.
const ACRONYMS: [(&str, u32); 17] = [
    ("NF", u32::NF),
    ("EZ", u32::EZ),
    ("TD", u32::TD),
    ("HD", u32::HD),
    ("HR", u32::HR),
    ("SD", u32::SD),
    ("DT", u32::DT),
    ("RX", u32::RX),
    ("HT", u32::HT),
    ("NC", u32::NC),
    ("FL", u32::FL),
    ("AO", u32::AO),
    ("SO", u32::SO),
    ("AP", u32::AP),
    ("PF", u32::PF),
    ("CN", u32::CN),
    ("V2", u32::V2),
];

/// Gamemods that can be parsed from and displayed as acronyms.
///
/// ```
/// use rosu_tp::GameMods;
///
/// let mods: GameMods = "nchd".parse().unwrap();
/// assert_eq!(mods.bits(), 8 + 64 + 512);
/// assert_eq!(mods.to_string(), "HDNC");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameMods(u32);

impl GameMods {
    /// No mods.
    pub const NOMOD: Self = Self(0);

    /// Create [`GameMods`] from bitflags.
    ///
    /// NC implies DT and PF implies SD.
    pub const fn from_bits(bits: u32) -> Self {
        let mut bits = bits;

        if bits & u32::NC > 0 {
            bits |= u32::DT;
        }

        if bits & u32::PF > 0 {
            bits |= u32::SD;
        }

        Self(bits)
    }

    /// The bitflags of the mods.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Whether all mods of `other` are contained in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn acronym_bits(acronym: &str) -> Option<u32> {
        ACRONYMS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(acronym))
            .map(|(_, bits)| *bits)
    }
}

impl FromStr for GameMods {
    type Err = Infallible;

    /// Parse consecutive two-letter acronyms.
    ///
    /// Matching is case-insensitive and unknown acronyms are skipped, as is a
    /// trailing single character.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits = s
            .as_bytes()
            .chunks_exact(2)
            .filter_map(|chunk| std::str::from_utf8(chunk).ok())
            .filter_map(Self::acronym_bits)
            .fold(0, |bits, acronym| bits | acronym);

        Ok(Self::from_bits(bits))
    }
}

impl Display for GameMods {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return f.write_str("NM");
        }

        let bits = self.0;

        for (name, flag) in ACRONYMS {
            // * NC already covers DT and PF covers SD
            let hidden = (flag == u32::DT && bits & u32::NC > 0)
                || (flag == u32::SD && bits & u32::PF > 0);

            if bits & flag > 0 && !hidden {
                f.write_str(name)?;
            }
        }

        Ok(())
    }
}

impl From<u32> for GameMods {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<GameMods> for u32 {
    fn from(mods: GameMods) -> Self {
        mods.0
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn clock_rate() {
        assert!((u32::DT.clock_rate() - 1.5).abs() < f64::EPSILON);
        assert!((u32::NC.clock_rate() - 1.5).abs() < f64::EPSILON);
        assert!((u32::HT.clock_rate() - 0.75).abs() < f64::EPSILON);
        assert!(((u32::DT | u32::HT).clock_rate() - 1.5).abs() < f64::EPSILON);
        assert!((0_u32.clock_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn queries() {
        let mods = u32::HD | u32::NC;

        assert!(mods.hd());
        assert!(mods.dt());
        assert!(mods.nc());
        assert!(!mods.hr());
        assert!(mods.change_speed());
        assert!(!u32::HD.change_map());
        assert!(u32::EZ.change_map());
    }

    #[rstest]
    #[case("", 0)]
    #[case("NM", 0)]
    #[case("HD", 8)]
    #[case("hdhr", 8 + 16)]
    #[case("NCHD", 8 + 64 + 512)]
    #[case("PF", 32 + 16384)]
    #[case("HDX", 8)]
    #[case("XXDT", 64)]
    fn parse_acronyms(#[case] input: &str, #[case] bits: u32) {
        let mods: GameMods = input.parse().unwrap();

        assert_eq!(mods.bits(), bits);
    }

    #[rstest]
    #[case(0, "NM")]
    #[case(8 + 16, "HDHR")]
    #[case(8 + 64 + 512, "HDNC")]
    #[case(512, "NC")]
    #[case(32 + 16384, "PF")]
    #[case(1 + 4096, "NFSO")]
    fn render_acronyms(#[case] bits: u32, #[case] expected: &str) {
        assert_eq!(GameMods::from(bits).to_string(), expected);
    }

    #[test]
    fn contains() {
        let mods = GameMods::from(u32::HD | u32::NC);

        assert!(mods.contains(GameMods::from(u32::DT)));
        assert!(!mods.contains(GameMods::from(u32::HR)));
        assert!(mods.contains(GameMods::NOMOD));
    }
}
