//! 词汇库桌面窗体
//!
//! 顶部是标题和统计，中间是词条列表和详情，底部是编辑/删除按钮。
//! 所有数据库调用都在界面线程上通过 block_on 同步执行。

use egui::{Align2, Color32, Context, FontFamily, FontId, Frame, Margin, RichText};
use tokio::runtime::Runtime;

use super::format::{detail_text, list_row, EMPTY_LIST_ROW};
use crate::error::{ActionError, StoreError};
use crate::handlers::word_handler::{
    Applied, DeleteOutcome, EditorMode, SaveOutcome, SearchOutcome, WordBook, WordType,
};
use crate::models::word::WordForm;

const HEADER_BG: Color32 = Color32::from_rgb(44, 62, 80);
const STATS_BG: Color32 = Color32::from_rgb(236, 240, 241);
const WARNING_FG: Color32 = Color32::from_rgb(230, 126, 34);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Notice {
    kind: NoticeKind,
    title: String,
    message: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }
}

/// 打开中的添加/编辑窗体
struct Editor {
    mode: EditorMode,
    form: WordForm,
    warning: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
enum UiAction {
    Refresh,
    Search,
    ChangeType(WordType),
    Select(usize),
    OpenEditor { add: bool },
    Save,
    CancelEditor,
    AskDelete,
    ConfirmDelete,
    CancelDelete,
    DismissNotice,
}

pub struct ThesaurusApp {
    rt: Runtime,
    book: WordBook,
    search_text: String,
    editor: Option<Editor>,
    pending_delete: Option<String>,
    notice: Option<Notice>,
}

impl ThesaurusApp {
    pub fn new(rt: Runtime, book: WordBook) -> Self {
        let mut app = Self {
            rt,
            book,
            search_text: String::new(),
            editor: None,
            pending_delete: None,
            notice: None,
        };
        app.apply(UiAction::Refresh);
        app
    }

    fn modal_open(&self) -> bool {
        self.editor.is_some() || self.pending_delete.is_some() || self.notice.is_some()
    }

    fn show_error(&mut self, err: impl std::fmt::Display) {
        self.notice = Some(Notice::new(NoticeKind::Error, "Error", err.to_string()));
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Refresh => {
                if let Err(e) = self.rt.block_on(self.book.refresh(None)) {
                    self.show_error(e);
                }
            }
            UiAction::Search => match self.rt.block_on(self.book.search(&self.search_text)) {
                Ok(SearchOutcome::Found(_)) => {}
                Ok(SearchOutcome::NotFound(term)) => {
                    self.notice = Some(Notice::new(
                        NoticeKind::Info,
                        "Search Result",
                        format!("Word '{term}' not found!"),
                    ));
                }
                Err(e) => self.show_error(e),
            },
            UiAction::ChangeType(word_type) => {
                self.search_text.clear();
                if let Err(e) = self.rt.block_on(self.book.set_word_type(word_type)) {
                    self.show_error(e);
                }
            }
            UiAction::Select(index) => {
                self.book.select(index);
            }
            UiAction::OpenEditor { add } => match self.book.editor_for(add) {
                Ok((mode, form)) => {
                    self.editor = Some(Editor {
                        mode,
                        form,
                        warning: None,
                    });
                }
                Err(e) => {
                    self.notice = Some(Notice::new(NoticeKind::Warning, "Warning", e.to_string()));
                }
            },
            UiAction::Save => self.save_editor(),
            UiAction::CancelEditor => self.editor = None,
            UiAction::AskDelete => match self.book.selected() {
                Some(record) => self.pending_delete = Some(record.word.clone()),
                None => {
                    self.notice = Some(Notice::new(
                        NoticeKind::Warning,
                        "Warning",
                        ActionError::NoSelection.to_string(),
                    ));
                }
            },
            UiAction::ConfirmDelete => {
                self.pending_delete = None;
                match self.rt.block_on(self.book.delete_selected()) {
                    Ok(Applied { outcome, refresh }) => {
                        let notice = match outcome {
                            DeleteOutcome::Deleted { .. } => Notice::new(
                                NoticeKind::Info,
                                "Success",
                                "Word deleted successfully!",
                            ),
                            DeleteOutcome::NotFound(word) => Notice::new(
                                NoticeKind::Warning,
                                "Warning",
                                format!("Word '{word}' no longer exists; nothing was deleted."),
                            ),
                        };
                        self.after_write(notice, refresh);
                    }
                    Err(e) => self.show_error(e),
                }
            }
            UiAction::CancelDelete => self.pending_delete = None,
            UiAction::DismissNotice => self.notice = None,
        }
    }

    fn save_editor(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };

        match self.rt.block_on(self.book.save(&editor.mode, &editor.form)) {
            Ok(Applied { outcome, refresh }) => {
                self.editor = None;
                let notice = match outcome {
                    SaveOutcome::Added(_) => {
                        Notice::new(NoticeKind::Info, "Success", "Word added successfully!")
                    }
                    SaveOutcome::Updated(_) => {
                        Notice::new(NoticeKind::Info, "Success", "Word updated successfully!")
                    }
                    SaveOutcome::NotFound(word) => Notice::new(
                        NoticeKind::Warning,
                        "Warning",
                        format!("Word '{word}' no longer exists; nothing was updated."),
                    ),
                };
                self.after_write(notice, refresh);
            }
            // 校验失败只在窗体内提示
            Err(ActionError::Validation(e)) => editor.warning = Some(e.to_string()),
            Err(e) => self.show_error(e),
        }
    }

    /// 写入已提交: 窗体照常关闭，刷新失败时把错误附在结果提示后面
    fn after_write(&mut self, notice: Notice, refresh: Result<(), StoreError>) {
        self.notice = Some(match refresh {
            Ok(()) => notice,
            Err(e) => Notice::new(
                NoticeKind::Error,
                "Error",
                format!("{}\n{e}", notice.message),
            ),
        });
    }

    fn render_header(&self, ctx: &Context) {
        let frame = Frame::none()
            .fill(HEADER_BG)
            .inner_margin(Margin::same(12.0));

        egui::TopBottomPanel::top("header").frame(frame).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new("📚 The Thesaurus")
                        .color(Color32::WHITE)
                        .strong()
                        .font(FontId::new(22.0, FontFamily::Proportional)),
                );
            });
        });

        let stats = self.book.stats();
        let frame = Frame::none().fill(STATS_BG).inner_margin(Margin::same(8.0));
        egui::TopBottomPanel::top("stats").frame(frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                let text = |s: String| RichText::new(s).color(HEADER_BG).size(13.0);
                ui.label(text(format!("📊 Total Words: {}", stats.total)).strong());
                ui.add_space(20.0);
                ui.label(text(format!("📝 With Synonyms: {}", stats.with_synonyms)));
                ui.add_space(20.0);
                ui.label(text(format!("🔄 With Antonyms: {}", stats.with_antonyms)));
            });
        });
    }

    fn render_controls(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("🏷️ Filter by Type:").strong());
            let current = self.book.word_type();
            let mut chosen = current;
            egui::ComboBox::from_id_source("word_type")
                .selected_text(chosen.label())
                .show_ui(ui, |ui| {
                    for word_type in WordType::ALL {
                        ui.selectable_value(&mut chosen, word_type, word_type.label());
                    }
                });
            if chosen != current {
                actions.push(UiAction::ChangeType(chosen));
            }

            ui.add_space(8.0);
            ui.label(RichText::new("🔍 Search Exact Word:").strong());
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.search_text).desired_width(140.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                actions.push(UiAction::Search);
            }
            if ui.button("Search").clicked() {
                actions.push(UiAction::Search);
            }
            if ui.button("➕ Add").clicked() {
                actions.push(UiAction::OpenEditor { add: true });
            }
            if ui.button("🔄 Refresh").clicked() {
                actions.push(UiAction::Refresh);
            }
        });
    }

    fn render_words(&self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("📖 Words List").strong().color(HEADER_BG));
            if let Some(filter) = self.book.filter() {
                ui.label(RichText::new(format!("(exact match: '{filter}')")).italics());
            }
        });

        let list_height = (ui.available_height() * 0.6).max(120.0);
        egui::ScrollArea::vertical()
            .id_source("word_list")
            .max_height(list_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let words = self.book.words();
                if words.is_empty() {
                    ui.label(RichText::new(EMPTY_LIST_ROW).monospace());
                    return;
                }
                let selected = self.book.selected_index();
                for (index, record) in words.iter().enumerate() {
                    let row = RichText::new(list_row(record)).monospace();
                    if ui.selectable_label(selected == Some(index), row).clicked() {
                        actions.push(UiAction::Select(index));
                    }
                }
            });

        ui.add_space(8.0);
        ui.label(RichText::new("ℹ️ Details").strong().color(HEADER_BG));
        let detail = self.book.selected().map(detail_text).unwrap_or_default();
        ui.add(
            egui::TextEdit::multiline(&mut detail.as_str())
                .font(egui::TextStyle::Monospace)
                .desired_rows(9)
                .desired_width(f32::INFINITY),
        );
    }

    fn render_actions(ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        ui.horizontal(|ui| {
            if ui.button("✏️ Edit").clicked() {
                actions.push(UiAction::OpenEditor { add: false });
            }
            if ui.button("🗑️ Delete").clicked() {
                actions.push(UiAction::AskDelete);
            }
        });
    }

    fn render_editor(&mut self, ctx: &Context, actions: &mut Vec<UiAction>) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let (title, word_editable) = match editor.mode {
            EditorMode::Add => ("Add New Word", true),
            EditorMode::Edit { .. } => ("Edit Word", false),
        };

        modal(title).show(ctx, |ui| {
            let field_width = 320.0;
            ui.label(RichText::new("Word:").strong());
            ui.add_enabled(
                word_editable,
                egui::TextEdit::singleline(&mut editor.form.word).desired_width(field_width),
            );
            ui.label(RichText::new("Meaning:").strong());
            ui.add(egui::TextEdit::singleline(&mut editor.form.meaning).desired_width(field_width));
            ui.label(RichText::new("Synonyms:").strong());
            ui.add(egui::TextEdit::singleline(&mut editor.form.synonyms).desired_width(field_width));
            ui.label(RichText::new("Antonyms:").strong());
            ui.add(egui::TextEdit::singleline(&mut editor.form.antonyms).desired_width(field_width));

            if let Some(warning) = &editor.warning {
                ui.colored_label(WARNING_FG, warning);
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                if ui.button("💾 Save Word").clicked() {
                    actions.push(UiAction::Save);
                }
                if ui.button("Cancel").clicked() {
                    actions.push(UiAction::CancelEditor);
                }
            });
        });
    }

    fn render_confirm_delete(&self, ctx: &Context, actions: &mut Vec<UiAction>) {
        let Some(word) = &self.pending_delete else {
            return;
        };
        modal("Confirm Delete").show(ctx, |ui| {
            ui.label(format!("Delete '{word}'?"));
            ui.horizontal(|ui| {
                if ui.button("Yes").clicked() {
                    actions.push(UiAction::ConfirmDelete);
                }
                if ui.button("No").clicked() {
                    actions.push(UiAction::CancelDelete);
                }
            });
        });
    }

    fn render_notice(&self, ctx: &Context, actions: &mut Vec<UiAction>) {
        let Some(notice) = &self.notice else {
            return;
        };
        let color = match notice.kind {
            NoticeKind::Info => HEADER_BG,
            NoticeKind::Warning => WARNING_FG,
            NoticeKind::Error => Color32::from_rgb(231, 76, 60),
        };
        modal(&notice.title).show(ctx, |ui| {
            ui.label(RichText::new(&notice.message).color(color));
            if ui.button("OK").clicked() {
                actions.push(UiAction::DismissNotice);
            }
        });
    }
}

fn modal(title: &str) -> egui::Window<'static> {
    egui::Window::new(title.to_string())
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
}

impl eframe::App for ThesaurusApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut actions = Vec::new();
        let enabled = !self.modal_open();

        self.render_header(ctx);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| self.render_controls(ui, &mut actions));
        });
        egui::TopBottomPanel::bottom("actions").show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| Self::render_actions(ui, &mut actions));
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| self.render_words(ui, &mut actions));
        });

        // 同一时间只显示一个弹窗: 提示 > 删除确认 > 编辑窗体
        if self.notice.is_some() {
            self.render_notice(ctx, &mut actions);
        } else if self.pending_delete.is_some() {
            self.render_confirm_delete(ctx, &mut actions);
        } else {
            self.render_editor(ctx, &mut actions);
        }

        for action in actions {
            self.apply(action);
        }
    }
}
