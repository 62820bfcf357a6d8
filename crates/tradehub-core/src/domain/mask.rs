//! 입력 마스크 패턴.

use serde::{Deserialize, Serialize};

/// 텍스트 입력에 적용되는 마스크 패턴 ID.
///
/// 패턴 문자: `9`, `H`, `h`, `m`은 숫자 하나, `A`는 문자 하나를 받습니다.
/// 나머지 문자는 그대로 삽입되는 리터럴입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaskPattern {
    /// 개인 납세자 번호
    Cpf,
    /// 법인 납세자 번호
    Cnpj,
    /// 우편번호
    Cep,
    /// 차량 번호판
    Placa,
    /// 시각
    Hora,
    /// 유선 전화
    Telefone,
    /// 휴대 전화
    Celular,
}

impl MaskPattern {
    /// 패턴 문자열 반환.
    pub fn pattern(&self) -> &'static str {
        match self {
            MaskPattern::Cpf => "999.999.999-99",
            MaskPattern::Cnpj => "99.999.999/9999-99",
            MaskPattern::Cep => "99.999-999",
            MaskPattern::Placa => "AAA-AAAA",
            MaskPattern::Hora => "Hh:m9",
            MaskPattern::Telefone => "+99 (99) 9999-9999",
            MaskPattern::Celular => "+99 (99) 99999-9999",
        }
    }

    /// 원시 입력에 마스크를 적용합니다.
    ///
    /// 슬롯에 맞지 않는 입력 문자는 건너뜁니다. 리터럴은 뒤따르는 슬롯이 입력 문자를 받을 때만
    /// 삽입됩니다.
    pub fn apply(&self, raw: &str) -> String {
        let mut out = String::with_capacity(self.pattern().len());
        let mut pending = String::new();
        let mut input = raw.chars().peekable();

        for slot in self.pattern().chars() {
            match Slot::of(slot) {
                Some(kind) => loop {
                    match input.next() {
                        Some(c) if kind.accepts(c) => {
                            out.push_str(&pending);
                            pending.clear();
                            out.push(c);
                            break;
                        }
                        Some(_) => continue,
                        None => return out,
                    }
                },
                None => {
                    if input.peek() == Some(&slot) {
                        input.next();
                    }
                    pending.push(slot);
                }
            }
        }

        out
    }

    /// 값이 마스크를 완전히 채웠는지 확인합니다.
    pub fn is_complete(&self, value: &str) -> bool {
        self.apply(value) == value && value.chars().count() == self.pattern().chars().count()
    }
}

#[derive(Clone, Copy)]
enum Slot {
    Digit,
    Letter,
}

impl Slot {
    fn of(c: char) -> Option<Self> {
        match c {
            '9' | 'H' | 'h' | 'm' => Some(Slot::Digit),
            'A' => Some(Slot::Letter),
            _ => None,
        }
    }

    fn accepts(self, c: char) -> bool {
        match self {
            Slot::Digit => c.is_ascii_digit(),
            Slot::Letter => c.is_alphabetic(),
        }
    }
}
