//! Run mode selected by the single positional argument

/// Provision (default) or tear down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Provision,
    Teardown,
}

impl Mode {
    pub fn is_teardown(self) -> bool {
        self == Mode::Teardown
    }
}

/// `true` / `false` だけを受け付ける（大文字小文字は無視）
///
/// `False` は作成モード。それ以外のトークンはエラー。
pub fn parse_mode(value: &str) -> Result<Mode, String> {
    if value.eq_ignore_ascii_case("true") {
        Ok(Mode::Teardown)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(Mode::Provision)
    } else {
        Err(format!(
            "'{}' は使えません。true（削除）または false（作成）を指定してください",
            value
        ))
    }
}
