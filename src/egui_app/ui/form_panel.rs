use eframe::egui::{self, Frame, Margin, RichText};

use super::CardioApp;
use super::style::{self, StatusTone};
use crate::features::FeatureKey;
use crate::fields::{self, ChoiceSet, FieldDescriptor, InputKind, NumericEntry};
use crate::locale::Text;

const NUMERIC_ENTRY_WIDTH: f32 = 160.0;

/// What the user did to one field this frame.
enum FieldEdit {
    Text(String),
    Choose(usize),
}

impl CardioApp {
    /// Render every field group in order.
    pub(super) fn render_form(&mut self, ui: &mut egui::Ui) {
        let locale = self.controller.locale();
        let palette = style::palette();
        for group in fields::groups(locale) {
            Frame::new()
                .stroke(style::group_border())
                .inner_margin(Margin::same(12))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(group.title).strong().size(15.0));
                    ui.label(RichText::new(group.description).color(palette.text_muted));
                    ui.add_space(6.0);
                    for &key in &group.keys {
                        self.render_field(ui, key);
                        ui.add_space(6.0);
                    }
                });
            ui.add_space(8.0);
        }
    }

    fn render_field(&mut self, ui: &mut egui::Ui, key: FeatureKey) {
        let locale = self.controller.locale();
        let descriptor = self.controller.describe(key);
        let submitting = self.controller.workflow().is_submitting();
        let failure = self
            .controller
            .workflow()
            .field_errors()
            .and_then(|errors| errors.get(key))
            .cloned();

        let mut edit = None;
        ui.push_id(key.wire_name(), |ui| {
            let label = ui.label(RichText::new(descriptor.label).strong());
            if let Some(hint) = descriptor.hint {
                label.on_hover_text(hint);
            }
            ui.add_enabled_ui(!submitting, |ui| {
                edit = match &descriptor.kind {
                    InputKind::Numeric(entry) => self.numeric_input(ui, key, entry, failure.is_some()),
                    InputKind::ExclusiveChoice(choices) => self.exclusive_choice(ui, key, choices),
                    InputKind::SingleSelect(choices) => self.single_select(ui, descriptor, choices),
                };
            });
            if let Some(failure) = &failure {
                ui.label(
                    RichText::new(locale.validation_message(failure))
                        .color(style::status_color(StatusTone::Error)),
                );
            }
        });

        match edit {
            Some(FieldEdit::Text(text)) => self.controller.edit_numeric(key, text),
            Some(FieldEdit::Choose(index)) => self.controller.choose_option(key, index),
            None => {}
        }
    }

    fn numeric_input(
        &self,
        ui: &mut egui::Ui,
        key: FeatureKey,
        entry: &NumericEntry,
        invalid: bool,
    ) -> Option<FieldEdit> {
        let mut text = self.controller.ui.numeric_text(key).to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut text)
                .hint_text(entry.range_hint())
                .desired_width(NUMERIC_ENTRY_WIDTH),
        );
        if invalid {
            ui.painter()
                .rect_stroke(response.rect, 0.0, style::invalid_border(), egui::StrokeKind::Outside);
        }
        response.changed().then_some(FieldEdit::Text(text))
    }

    fn exclusive_choice(
        &self,
        ui: &mut egui::Ui,
        key: FeatureKey,
        choices: &ChoiceSet,
    ) -> Option<FieldEdit> {
        let active = choices.active_index(self.controller.workflow().input().get(key));
        let mut chosen = None;
        ui.horizontal(|ui| {
            for (index, option) in choices.options().iter().enumerate() {
                let text = match option.icon {
                    Some(icon) => format!("{icon} {}", option.label),
                    None => option.label.to_string(),
                };
                let response = ui.selectable_label(active == Some(index), text);
                let response = match option.description {
                    Some(description) => response.on_hover_text(description),
                    None => response,
                };
                if response.clicked() && active != Some(index) {
                    chosen = Some(index);
                }
            }
        });
        chosen.map(FieldEdit::Choose)
    }

    fn single_select(
        &self,
        ui: &mut egui::Ui,
        descriptor: &FieldDescriptor,
        choices: &ChoiceSet,
    ) -> Option<FieldEdit> {
        let locale = self.controller.locale();
        let stored = self.controller.workflow().input().get(descriptor.key);
        let active = choices.active_index(stored);
        let selected_text = choices
            .active(stored)
            .map_or(locale.text(Text::SelectPlaceholder), |option| option.label);
        let mut chosen = None;
        egui::ComboBox::from_id_salt(("field_select", descriptor.key.wire_name()))
            .selected_text(selected_text)
            .width(NUMERIC_ENTRY_WIDTH * 2.0)
            .show_ui(ui, |ui| {
                for (index, option) in choices.options().iter().enumerate() {
                    let response = ui.selectable_label(active == Some(index), option.label);
                    let response = match option.description {
                        Some(description) => response.on_hover_text(description),
                        None => response,
                    };
                    if response.clicked() {
                        chosen = Some(index);
                    }
                }
            });
        if let Some(description) = choices.active(stored).and_then(|option| option.description) {
            ui.label(RichText::new(description).color(style::palette().text_muted).small());
        }
        chosen.map(FieldEdit::Choose)
    }

    /// Submit and reset buttons plus the validation banner.
    pub(super) fn render_actions(&mut self, ui: &mut egui::Ui) {
        let locale = self.controller.locale();
        let submitting = self.controller.workflow().is_submitting();
        let mut submit_clicked = false;
        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            let submit_label = if submitting {
                locale.text(Text::Submitting)
            } else {
                locale.text(Text::Submit)
            };
            if ui
                .add_enabled(!submitting, egui::Button::new(RichText::new(submit_label).strong()))
                .clicked()
            {
                submit_clicked = true;
            }
            if submitting {
                ui.spinner();
            }
            ui.add_space(8.0);
            if ui.button(locale.text(Text::Reset)).clicked() {
                reset_clicked = true;
            }
        });
        if self.controller.ui.show_validation_banner {
            ui.add_space(6.0);
            ui.label(
                RichText::new(locale.text(Text::FixHighlightedFields))
                    .color(style::status_color(StatusTone::Error)),
            );
        }
        if submit_clicked {
            self.controller.submit();
        }
        if reset_clicked {
            self.controller.reset();
        }
    }
}
