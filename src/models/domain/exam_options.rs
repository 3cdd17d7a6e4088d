use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Subjects offered on the configuration form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Subject {
    Toan,
    NguVan,
    TiengAnh,
    TinHoc,
    KhoaHocTuNhien,
    LichSu,
    DiaLi,
    GiaoDucCongDan,
    CongNghe,
    NgheThuat,
    GiaoDucTheChat,
}

impl Subject {
    pub const ALL: [Subject; 11] = [
        Subject::Toan,
        Subject::NguVan,
        Subject::TiengAnh,
        Subject::TinHoc,
        Subject::KhoaHocTuNhien,
        Subject::LichSu,
        Subject::DiaLi,
        Subject::GiaoDucCongDan,
        Subject::CongNghe,
        Subject::NgheThuat,
        Subject::GiaoDucTheChat,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Subject::Toan => "Toán",
            Subject::NguVan => "Ngữ văn",
            Subject::TiengAnh => "Tiếng Anh",
            Subject::TinHoc => "Tin học",
            Subject::KhoaHocTuNhien => "Khoa học tự nhiên",
            Subject::LichSu => "Lịch sử",
            Subject::DiaLi => "Địa lí",
            Subject::GiaoDucCongDan => "Giáo dục công dân",
            Subject::CongNghe => "Công nghệ",
            Subject::NgheThuat => "Âm nhạc & Mỹ thuật",
            Subject::GiaoDucTheChat => "Giáo dục thể chất",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Grade {
    G6,
    G7,
    G8,
    G9,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::G6, Grade::G7, Grade::G8, Grade::G9];

    pub fn label(self) -> &'static str {
        match self {
            Grade::G6 => "Lớp 6",
            Grade::G7 => "Lớp 7",
            Grade::G8 => "Lớp 8",
            Grade::G9 => "Lớp 9",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Duration {
    M45,
    M60,
    M90,
}

impl Duration {
    pub const ALL: [Duration; 3] = [Duration::M45, Duration::M60, Duration::M90];

    pub fn label(self) -> &'static str {
        match self {
            Duration::M45 => "45 phút",
            Duration::M60 => "60 phút",
            Duration::M90 => "90 phút",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Scale {
    S10,
    S5,
}

impl Scale {
    pub const ALL: [Scale; 2] = [Scale::S10, Scale::S5];

    pub fn label(self) -> &'static str {
        match self {
            Scale::S10 => "10 điểm",
            Scale::S5 => "5 điểm",
        }
    }
}

/// Knowledge scope of the exam.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub enum ScopeMode {
    #[default]
    #[serde(rename = "term-1")]
    Term1,
    #[serde(rename = "term-2")]
    Term2,
    #[serde(rename = "specific-topic")]
    SpecificTopic,
}

impl ScopeMode {
    pub const ALL: [ScopeMode; 3] = [ScopeMode::Term1, ScopeMode::Term2, ScopeMode::SpecificTopic];

    pub fn label(self) -> &'static str {
        match self {
            ScopeMode::Term1 => "Học kì I",
            ScopeMode::Term2 => "Học kì II",
            ScopeMode::SpecificTopic => "Theo chủ đề",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            ScopeMode::Term1 => "term-1",
            ScopeMode::Term2 => "term-2",
            ScopeMode::SpecificTopic => "specific-topic",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_mode_uses_kebab_case_wire_names() {
        for mode in ScopeMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.slug()));
            let parsed: ScopeMode = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, mode);
        }
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = Subject::ALL.iter().map(|s| s.label()).collect();
        let len = labels.len();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), len);
    }

    #[test]
    fn default_scope_is_first_term() {
        assert_eq!(ScopeMode::default(), ScopeMode::Term1);
        assert_eq!(ScopeMode::default().label(), "Học kì I");
    }
}
