//! User-facing message catalog
//!
//! Japanese is the canonical language; English is provided for terminals
//! and deployments that need it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Display language for messages and UI labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ja => "ja",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ja" | "ja-jp" | "japanese" => Ok(Locale::Ja),
            "en" | "en-us" | "english" => Ok(Locale::En),
            other => Err(format!("Unsupported locale '{}' (expected 'ja' or 'en')", other)),
        }
    }
}

/// Every user-facing string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    // Errors
    NoFileSelected,
    UnknownError,
    InvalidFileType,
    BadRequest,
    Unprocessable,
    InternalServerError,
    ServerError(u16),
    MalformedResponse,
    Unreachable,
    FileTooLarge,

    // Labels
    AppTitle,
    AppSubtitle,
    StepSelectFile,
    StepResults,
    CheckButton,
    Checking,
    Analyzing,
    IdleHint,
    DropHintClick,
    DropHintDrag,
    DocxOnly,
    RemoveFile,
    ErrorLabel,
    SuggestionsHeading,
    DetailsHeading,
}

impl Message {
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::Ja => self.ja(),
            Locale::En => self.en(),
        }
    }

    fn ja(&self) -> String {
        match self {
            Message::NoFileSelected => "ファイルが選択されていません。".into(),
            Message::UnknownError => "不明なエラーが発生しました。".into(),
            Message::InvalidFileType => ".docx 形式のファイルを選択してください。".into(),
            Message::BadRequest => {
                "リクエストが不正です。ファイル形式が.docxであることを確認してください。".into()
            }
            Message::Unprocessable => {
                "ファイルが破損しているか、サーバーが解析できませんでした。".into()
            }
            Message::InternalServerError => {
                "サーバー内部でエラーが発生しました。しばらくしてから再度お試しください。".into()
            }
            Message::ServerError(status) => {
                format!("サーバーエラーが発生しました (ステータス: {})。", status)
            }
            Message::MalformedResponse => {
                "サーバーからの応答を解析できませんでした。予期しない形式の可能性があります。"
                    .into()
            }
            Message::Unreachable => "サーバーに接続できませんでした。".into(),
            Message::FileTooLarge => "ファイルサイズが上限を超えています。".into(),
            Message::AppTitle => "自動書類チェッカー".into(),
            Message::AppSubtitle => {
                "Wordファイル（.docx）をアップロードしてフォーマットと内容をチェックします。".into()
            }
            Message::StepSelectFile => "1. ファイルを選択".into(),
            Message::StepResults => "2. チェック結果".into(),
            Message::CheckButton => "ドキュメントをチェック".into(),
            Message::Checking => "チェック中...".into(),
            Message::Analyzing => "解析しています...".into(),
            Message::IdleHint => {
                "ファイルをアップロードして「ドキュメントをチェック」ボタンを押してください。".into()
            }
            Message::DropHintClick => "クリックしてアップロード".into(),
            Message::DropHintDrag => "またはドラッグ＆ドロップ".into(),
            Message::DocxOnly => ".docx のみ".into(),
            Message::RemoveFile => "ファイルを削除".into(),
            Message::ErrorLabel => "エラー:".into(),
            Message::SuggestionsHeading => "AIからの提案".into(),
            Message::DetailsHeading => "詳細なチェック結果".into(),
        }
    }

    fn en(&self) -> String {
        match self {
            Message::NoFileSelected => "No file selected.".into(),
            Message::UnknownError => "An unknown error occurred.".into(),
            Message::InvalidFileType => "Please select a .docx file.".into(),
            Message::BadRequest => {
                "The request was rejected. Make sure the file is a .docx document.".into()
            }
            Message::Unprocessable => {
                "The file is corrupted or the server could not analyze it.".into()
            }
            Message::InternalServerError => {
                "The server encountered an internal error. Please try again later.".into()
            }
            Message::ServerError(status) => format!("Server error (status: {}).", status),
            Message::MalformedResponse => {
                "Could not parse the server response. The format may be unexpected.".into()
            }
            Message::Unreachable => "Could not connect to the server.".into(),
            Message::FileTooLarge => "The file exceeds the upload size limit.".into(),
            Message::AppTitle => "Document Checker".into(),
            Message::AppSubtitle => {
                "Upload a Word file (.docx) to check its formatting and content.".into()
            }
            Message::StepSelectFile => "1. Select a file".into(),
            Message::StepResults => "2. Results".into(),
            Message::CheckButton => "Check document".into(),
            Message::Checking => "Checking...".into(),
            Message::Analyzing => "Analyzing...".into(),
            Message::IdleHint => "Upload a file and press \"Check document\".".into(),
            Message::DropHintClick => "Click to upload".into(),
            Message::DropHintDrag => "or drag and drop".into(),
            Message::DocxOnly => ".docx only".into(),
            Message::RemoveFile => "Remove file".into(),
            Message::ErrorLabel => "Error:".into(),
            Message::SuggestionsHeading => "AI suggestions".into(),
            Message::DetailsHeading => "Detailed results".into(),
        }
    }
}
