use std::fmt::Write as _;

use serde::Serialize;

use tis_rs::NodeImage;

#[derive(Debug, Clone, Serialize)]
pub struct SlotOut {
    pub slot: usize,
    pub word: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Value the node's config register takes for this image.
    pub config: u16,
    pub slots: Vec<SlotOut>,
}

pub fn build_report(img: &NodeImage) -> Report {
    let slots = img
        .listing()
        .into_iter()
        .map(|line| {
            let (text, error) = match line.text {
                Ok(t) => (Some(t), None),
                Err(e) => (None, Some(e.to_string())),
            };
            SlotOut { slot: line.slot, word: line.word, text, error }
        })
        .collect();
    Report { config: img.config_word(), slots }
}

pub fn render_text(report: &Report, show_bytes: bool) -> String {
    let mut buf = String::new();
    for s in &report.slots {
        let _ = write!(buf, "{:2}: ", s.slot);
        if show_bytes {
            for b in s.word.to_le_bytes() {
                let _ = write!(buf, "{b:02x} ");
            }
            buf.push(' ');
        }
        match &s.text {
            Some(t) => {
                let _ = writeln!(buf, "{t}");
            }
            None => {
                let _ = writeln!(buf, "<invalid> {:#06x}", s.word);
            }
        }
    }
    buf
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_listing_marks_invalid_words() {
        let img = NodeImage::new(vec![0xC802, 0x4001, 0xD801]).unwrap();
        let report = build_report(&img);
        assert_eq!(report.config, 2);
        assert_eq!(
            render_text(&report, false),
            " 0: MOV UP, ACC\n 1: <invalid> 0x4001\n 2: MOV ACC, DOWN\n"
        );
    }

    #[test]
    fn text_listing_with_bytes() {
        let img = NodeImage::new(vec![0x0801]).unwrap();
        assert_eq!(render_text(&build_report(&img), true), " 0: 01 08  ADD ACC\n");
    }

    #[test]
    fn json_omits_missing_fields() {
        let img = NodeImage::new(vec![0x4001]).unwrap();
        let json = serde_json::to_value(build_report(&img)).unwrap();
        assert_eq!(json["config"], 0);
        assert_eq!(json["slots"][0]["word"], 0x4001);
        assert!(json["slots"][0].get("text").is_none());
        assert_eq!(json["slots"][0]["error"], "invalid opcode bits in word 0x4001");
    }
}
