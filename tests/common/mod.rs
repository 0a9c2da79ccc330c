#![allow(dead_code)]

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::write::DeflateEncoder;
use flate2::{Compression, Crc};

pub const ROOT: &str = "unicode-table-data-master/";

/// Writes minimal ZIP archives (stored or deflated entries, no ZIP64).
#[derive(Default)]
pub struct ZipBuilder {
    entries: Vec<(String, Vec<u8>, bool)>,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dir(mut self, name: &str) -> Self {
        assert!(name.ends_with('/'));
        self.entries.push((name.to_string(), Vec::new(), false));
        self
    }

    pub fn stored(mut self, name: &str, text: &str) -> Self {
        self.entries.push((name.to_string(), text.as_bytes().to_vec(), false));
        self
    }

    pub fn deflated(mut self, name: &str, text: &str) -> Self {
        self.entries.push((name.to_string(), text.as_bytes().to_vec(), true));
        self
    }

    pub fn finish(self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut central = Vec::new();

        for (name, data, deflate) in &self.entries {
            let offset = out.len() as u32;
            let mut crc = Crc::new();
            crc.update(data);
            let payload = if *deflate {
                let mut enc = DeflateEncoder::new(Vec::new(), Compression::default());
                enc.write_all(data).unwrap();
                enc.finish().unwrap()
            } else {
                data.clone()
            };
            let method: u16 = if *deflate { 8 } else { 0 };

            out.write_u32::<LittleEndian>(0x0403_4b50).unwrap();
            out.write_u16::<LittleEndian>(20).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.write_u16::<LittleEndian>(method).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.write_u32::<LittleEndian>(crc.sum()).unwrap();
            out.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
            out.write_u32::<LittleEndian>(data.len() as u32).unwrap();
            out.write_u16::<LittleEndian>(name.len() as u16).unwrap();
            out.write_u16::<LittleEndian>(0).unwrap();
            out.extend_from_slice(name.as_bytes());
            out.extend_from_slice(&payload);

            central.write_u32::<LittleEndian>(0x0201_4b50).unwrap();
            central.write_u16::<LittleEndian>(20).unwrap();
            central.write_u16::<LittleEndian>(20).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u16::<LittleEndian>(method).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u32::<LittleEndian>(crc.sum()).unwrap();
            central.write_u32::<LittleEndian>(payload.len() as u32).unwrap();
            central.write_u32::<LittleEndian>(data.len() as u32).unwrap();
            central.write_u16::<LittleEndian>(name.len() as u16).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u16::<LittleEndian>(0).unwrap();
            central.write_u32::<LittleEndian>(0).unwrap();
            central.write_u32::<LittleEndian>(offset).unwrap();
            central.extend_from_slice(name.as_bytes());
        }

        let directory_offset = out.len() as u32;
        out.extend_from_slice(&central);
        out.write_u32::<LittleEndian>(0x0605_4b50).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out.write_u16::<LittleEndian>(self.entries.len() as u16).unwrap();
        out.write_u16::<LittleEndian>(self.entries.len() as u16).unwrap();
        out.write_u32::<LittleEndian>(central.len() as u32).unwrap();
        out.write_u32::<LittleEndian>(directory_offset).unwrap();
        out.write_u16::<LittleEndian>(0).unwrap();
        out
    }
}

pub const RANGES: &str = "\
Unicode blocks

[Basic Latin]
 diap: 0000:007F

[Latin-1 Supplement]
 diap: 0080:00FF

[Currency Symbols]
 diap: 20A0:20CF

[Glagolitic]
 diap: 2C00:2C5F

[Emoticons]
 diap: 1F600:1F64F

[Tags]
 diap: E0000:E007F
";

pub const EN_LATIN: &str = "\
0041: LATIN CAPITAL LETTER A
0042: LATIN CAPITAL LETTER B
0061: LATIN SMALL LETTER A
0065: LATIN SMALL LETTER E
0066 LATIN SMALL LETTER F
broken line
";

pub const RU_LATIN: &str = "\
0041: ЛАТИНСКАЯ ЗАГЛАВНАЯ БУКВА A
0042: ЛАТИНСКАЯ ЗАГЛАВНАЯ БУКВА B
0061: ЛАТИНСКАЯ СТРОЧНАЯ БУКВА A
0065: ЛАТИНСКАЯ СТРОЧНАЯ БУКВА E
";

pub const EN_BLOCKS: &str = "\
Basic Latin: Basic Latin
Latin-1 Supplement: Latin-1 Supplement
Currency Symbols: Currency Symbols
Glagolitic: Glagolitic
Emoticons: Emoticons
Tags: Tags
";

pub const RU_BLOCKS: &str = "\
Basic Latin : Основная латиница
Latin-1 Supplement : Дополнительная латиница-1
Currency Symbols : Символы валют
Glagolitic : Глаголица
Emoticons : Эмотиконы
Tags : Теги
";

fn path(relative: &str) -> String {
    format!("{}{}", ROOT, relative)
}

/// The full test archive: `en` and `ru` are complete, `de` has only block
/// names and `fr` only symbols.
pub fn sample_builder() -> ZipBuilder {
    ZipBuilder::new()
        .dir(ROOT)
        .dir(&path("data/"))
        .deflated(&path("data/blocks.txt"), RANGES)
        .dir(&path("loc/en/symbols/"))
        .stored(&path("loc/en/symbols/latin.txt"), EN_LATIN)
        .dir(&path("loc/en/symbols/more/"))
        .deflated(
            &path("loc/en/symbols/more/latin1.txt"),
            "00E9: LATIN SMALL LETTER E WITH ACUTE\n",
        )
        .deflated(&path("loc/en/symbols/currency.txt"), "20AC: EURO SIGN\n")
        .deflated(
            &path("loc/en/symbols/emoji.txt"),
            "1F600: GRINNING FACE\nE0041: TAG LATIN CAPITAL LETTER A\n",
        )
        .deflated(&path("loc/en/blocks.txt"), EN_BLOCKS)
        .stored(&path("loc/ru/symbols/latin.txt"), RU_LATIN)
        .deflated(
            &path("loc/ru/symbols/more/latin1.txt"),
            "00E9: ЛАТИНСКАЯ СТРОЧНАЯ БУКВА E С АКУТОМ\n",
        )
        .deflated(&path("loc/ru/symbols/currency.txt"), "20AC: ЗНАК ЕВРО\n")
        .deflated(
            &path("loc/ru/symbols/emoji.txt"),
            "1F600: УХМЫЛЯЮЩЕЕСЯ ЛИЦО\nE0041: ТЕГ ЛАТИНСКАЯ ЗАГЛАВНАЯ БУКВА A\n",
        )
        .deflated(&path("loc/ru/blocks.txt"), RU_BLOCKS)
        .deflated(&path("loc/de/blocks.txt"), EN_BLOCKS)
        .deflated(&path("loc/fr/symbols/latin.txt"), EN_LATIN)
}

pub fn sample_archive() -> Vec<u8> {
    sample_builder().finish()
}
