use std::{fmt::Display, str::FromStr};

/// The resource types this library understands.
///
/// Type codes are four bytes on disk. Codes shorter than four characters are
/// padded with spaces (`SND `, `STR `). [`ResourceType::Png`] is not a native
/// Mac type, but some editors store PNG images under that code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceType {
    Alis,
    Alrt,
    Appl,
    Bndl,
    Clcn,
    Clut,
    Code,
    Curs,
    Ditl,
    Dlog,
    Fref,
    Hfdr,
    Icl8,
    Icns,
    Icon,
    Kind,
    Mbar,
    Mdef,
    Moov,
    Open,
    Pict,
    Pref,
    Snd,
    Str,
    Styl,
    Text,
    Tmpl,
    Vers,
    Wdef,
    Wind,
    Png,
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Conversion Error: {0}")]
pub struct ConversionError(String);

impl ResourceType {
    pub const ALL: [ResourceType; 31] = [
        ResourceType::Alis,
        ResourceType::Alrt,
        ResourceType::Appl,
        ResourceType::Bndl,
        ResourceType::Clcn,
        ResourceType::Clut,
        ResourceType::Code,
        ResourceType::Curs,
        ResourceType::Ditl,
        ResourceType::Dlog,
        ResourceType::Fref,
        ResourceType::Hfdr,
        ResourceType::Icl8,
        ResourceType::Icns,
        ResourceType::Icon,
        ResourceType::Kind,
        ResourceType::Mbar,
        ResourceType::Mdef,
        ResourceType::Moov,
        ResourceType::Open,
        ResourceType::Pict,
        ResourceType::Pref,
        ResourceType::Snd,
        ResourceType::Str,
        ResourceType::Styl,
        ResourceType::Text,
        ResourceType::Tmpl,
        ResourceType::Vers,
        ResourceType::Wdef,
        ResourceType::Wind,
        ResourceType::Png,
    ];

    /// The type code without padding, e.g. `"SND"`.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ResourceType::Alis => "ALIS",
            ResourceType::Alrt => "ALRT",
            ResourceType::Appl => "APPL",
            ResourceType::Bndl => "BNDL",
            ResourceType::Clcn => "CLCN",
            ResourceType::Clut => "CLUT",
            ResourceType::Code => "CODE",
            ResourceType::Curs => "CURS",
            ResourceType::Ditl => "DITL",
            ResourceType::Dlog => "DLOG",
            ResourceType::Fref => "FREF",
            ResourceType::Hfdr => "HFDR",
            ResourceType::Icl8 => "ICL8",
            ResourceType::Icns => "ICNS",
            ResourceType::Icon => "ICON",
            ResourceType::Kind => "KIND",
            ResourceType::Mbar => "MBAR",
            ResourceType::Mdef => "MDEF",
            ResourceType::Moov => "MOOV",
            ResourceType::Open => "OPEN",
            ResourceType::Pict => "PICT",
            ResourceType::Pref => "PREF",
            ResourceType::Snd => "SND",
            ResourceType::Str => "STR",
            ResourceType::Styl => "STYL",
            ResourceType::Text => "TEXT",
            ResourceType::Tmpl => "TMPL",
            ResourceType::Vers => "VERS",
            ResourceType::Wdef => "WDEF",
            ResourceType::Wind => "WIND",
            ResourceType::Png => "PNG",
        }
    }

    /// The four-byte on-disk code, padded with spaces.
    #[must_use]
    pub fn code(self) -> [u8; 4] {
        let mut code = [b' '; 4];
        let name = self.name().as_bytes();
        code[..name.len()].copy_from_slice(name);
        code
    }

    /// Decodes a four-byte type code.
    ///
    /// Matching ignores case and any leading or trailing spaces or control
    /// bytes, so `snd ` and `SND\0` both decode to [`ResourceType::Snd`].
    pub fn from_code(code: [u8; 4]) -> Result<Self, ConversionError> {
        if !code.is_ascii() {
            return Err(ConversionError(format!(
                "Invalid resource type code: {code:02X?}"
            )));
        }
        let text: String = code.iter().map(|&b| char::from(b)).collect();
        text.parse()
    }
}

impl FromStr for ResourceType {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim_matches(|c: char| c <= ' ');
        ResourceType::ALL
            .into_iter()
            .find(|res_type| res_type.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConversionError(format!("Unknown resource type: {s:?}")))
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl From<ResourceType> for [u8; 4] {
    fn from(value: ResourceType) -> [u8; 4] {
        value.code()
    }
}

impl TryFrom<[u8; 4]> for ResourceType {
    type Error = ConversionError;

    fn try_from(value: [u8; 4]) -> Result<Self, Self::Error> {
        ResourceType::from_code(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_padded_codes() {
        assert_eq!(ResourceType::from_code(*b"SND ").unwrap(), ResourceType::Snd);
        assert_eq!(ResourceType::from_code(*b"PNG\0").unwrap(), ResourceType::Png);
        assert_eq!(ResourceType::from_code(*b"PICT").unwrap(), ResourceType::Pict);
    }

    #[test]
    fn decoding_ignores_case() {
        assert_eq!(ResourceType::from_code(*b"text").unwrap(), ResourceType::Text);
        assert_eq!("Icl8".parse::<ResourceType>().unwrap(), ResourceType::Icl8);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(ResourceType::from_code(*b"XYZW").is_err());
        assert!(ResourceType::from_code([0xFF, 0xFF, 0x00, 0x01]).is_err());
        assert!(ResourceType::from_code(*b"S ND").is_err());
    }

    #[test]
    fn codes_round_trip() {
        for res_type in ResourceType::ALL {
            assert_eq!(ResourceType::from_code(res_type.code()).unwrap(), res_type);
        }
        assert_eq!(&ResourceType::Str.code(), b"STR ");
    }

    #[test]
    fn displays_unpadded_name() {
        assert_eq!(ResourceType::Snd.to_string(), "SND");
    }
}
