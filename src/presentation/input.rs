/// プレゼンテーション層: ユーザー入力処理
///
/// 対話セッションで stdin からファイルパスやメニュー選択を読み取り、
/// アプリケーション層で使用可能な形式に変換します。
/// プロンプトは stderr に出力し、stdout は機械可読出力用に空けておく。
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// ファイルパス入力の解釈結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathInput {
    /// ファイルパス（前後の引用符は除去済み）
    Path(String),
    /// 空行（選択なし）
    Empty,
    /// 終了
    Quit,
}

/// 1行を読み取る
///
/// # Returns
/// * `Ok(None)` - 入力終端（Ctrl-D）
fn read_line(prompt: &str) -> Result<Option<String>> {
    eprint!("{}", prompt);
    io::stderr().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read from standard input")?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

/// 入力行をファイルパスとして解釈する
///
/// ターミナルにファイルをドラッグ＆ドロップすると引用符付きのパスが入力されるため、
/// 対になった `'` / `"` は取り除く。
pub fn parse_path_input(input: &str) -> PathInput {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return PathInput::Empty;
    }
    if trimmed.eq_ignore_ascii_case("q") {
        return PathInput::Quit;
    }

    let unquoted = ['"', '\'']
        .iter()
        .find_map(|quote| {
            trimmed
                .strip_prefix(*quote)
                .and_then(|rest| rest.strip_suffix(*quote))
        })
        .unwrap_or(trimmed);

    PathInput::Path(unquoted.to_string())
}

/// 入力行をメニュー選択として解釈する
///
/// 先頭の1文字を小文字化して `choices` に含まれていれば返す。
pub fn parse_choice(input: &str, choices: &[char]) -> Option<char> {
    let mut chars = input.trim().chars();
    let first = chars.next()?.to_ascii_lowercase();
    if chars.next().is_some() {
        return None;
    }
    choices.contains(&first).then_some(first)
}

/// アップロードするファイルのパスを尋ねる
///
/// 入力終端は `PathInput::Quit` として扱う。
pub fn read_file_path() -> Result<PathInput> {
    match read_line("\nFile to upload (drop a .zip here, q to quit): ")? {
        Some(line) => Ok(parse_path_input(&line)),
        None => Ok(PathInput::Quit),
    }
}

/// 有効な選択が入力されるまでメニューを表示する
///
/// # Returns
/// * `Ok(None)` - 入力終端
pub fn read_choice(menu: &str, choices: &[char]) -> Result<Option<char>> {
    loop {
        let Some(line) = read_line(&format!("{} ", menu))? else {
            return Ok(None);
        };
        if let Some(choice) = parse_choice(&line, choices) {
            return Ok(Some(choice));
        }
        eprintln!("Please enter one of: {}", join_choices(choices));
    }
}

fn join_choices(choices: &[char]) -> String {
    choices
        .iter()
        .map(char::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_path_input() {
        assert_eq!(parse_path_input("  \n"), PathInput::Empty);
        assert_eq!(parse_path_input("Q\n"), PathInput::Quit);
        assert_eq!(
            parse_path_input("/tmp/a.zip\n"),
            PathInput::Path("/tmp/a.zip".to_string())
        );
    }

    #[test]
    fn test_parse_path_input_strips_drop_quotes() {
        assert_eq!(
            parse_path_input("'/tmp/my files/a.zip' \n"),
            PathInput::Path("/tmp/my files/a.zip".to_string())
        );
        assert_eq!(
            parse_path_input("\"C:\\Users\\me\\a.zip\""),
            PathInput::Path("C:\\Users\\me\\a.zip".to_string())
        );
        // 片側だけの引用符はそのまま
        assert_eq!(
            parse_path_input("'a.zip"),
            PathInput::Path("'a.zip".to_string())
        );
    }

    #[test]
    fn test_parse_choice() {
        let choices = ['c', 'n', 'q'];
        assert_eq!(parse_choice("c\n", &choices), Some('c'));
        assert_eq!(parse_choice(" N ", &choices), Some('n'));
        assert_eq!(parse_choice("x", &choices), None);
        assert_eq!(parse_choice("copy", &choices), None);
        assert_eq!(parse_choice("", &choices), None);
    }
}
