use super::view_model::PageEditVm;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use contracts::domain::a001_page::{FieldPath, FieldType};
use leptos::prelude::*;

fn error_line(vm: PageEditVm, path: FieldPath) -> impl IntoView {
    move || {
        vm.error_for(path)
            .map(|message| view! { <div class="field-error">{message}</div> })
    }
}

#[component]
pub fn PageEdit(#[prop(optional)] id: Option<String>) -> impl IntoView {
    let vm = PageEditVm::new();
    if let Some(id) = id {
        vm.load(id);
    }

    let field_count = Memo::new(move |_| vm.store.with(|s| s.len()));
    let is_saving = Memo::new(move |_| vm.store.with(|s| s.is_saving()));
    let focused = Memo::new(move |_| vm.store.with(|s| s.session().focused()));

    view! {
        <div class="details-container page-edit">
            <div class="details-header">
                <h3>"Редактирование страницы"</h3>
            </div>

            {move || vm.loading.get().then(|| view! { <div class="loading">"Загрузка..."</div> })}
            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}
            {move || vm.success.get().map(|m| view! { <div class="success">{m}</div> })}
            {move || {
                vm.general_errors()
                    .into_iter()
                    .map(|e| view! { <div class="error">{e}</div> })
                    .collect_view()
            }}

            <div class="details-form">
                <div class="form-group">
                    <label for="page-name">"Название"</label>
                    <input
                        type="text"
                        id="page-name"
                        prop:value=move || vm.store.with(|s| s.page().name.clone())
                        on:input=move |ev| vm.set_page_name(event_target_value(&ev))
                    />
                    {error_line(vm, FieldPath::PageName)}
                </div>

                <IdentifierEditor vm=vm />
            </div>

            <div class="page-fields">
                {move || {
                    (0..field_count.get())
                        .map(|index| view! { <FieldCard vm=vm index=index /> })
                        .collect_view()
                }}
            </div>

            <div class="details-actions">
                <button
                    class="btn btn-secondary"
                    on:click=move |_| vm.add_field(field_count.get_untracked().saturating_sub(1))
                >
                    {icon("plus")}
                    "Добавить поле"
                </button>
                <button
                    class="btn btn-primary"
                    disabled=move || is_saving.get()
                    on:click=move |_| vm.save_command()
                >
                    {icon("save")}
                    {move || if is_saving.get() { "Сохранение..." } else { "Сохранить" }}
                </button>
            </div>

            {move || focused.get().map(|index| view! { <FieldConfigModal vm=vm index=index /> })}
        </div>
    }
}

/// Идентификатор страницы: заблокирован, пока не нажата кнопка редактирования
#[component]
fn IdentifierEditor(vm: PageEditVm) -> impl IntoView {
    let locked = Memo::new(move |_| vm.store.with(|s| s.identifier_edit().is_locked()));

    view! {
        <div class="form-group">
            <label for="page-identifier">"Идентификатор"</label>
            {move || {
                if locked.get() {
                    view! {
                        <div class="identifier-locked">
                            <code>{move || vm.store.with(|s| s.page().identifier.clone())}</code>
                            <button
                                class="button button--icon"
                                title="Изменить"
                                on:click=move |_| vm.begin_identifier_edit()
                            >
                                {icon("edit")}
                            </button>
                        </div>
                    }
                        .into_any()
                } else {
                    view! {
                        <div class="identifier-unlocked">
                            <input
                                type="text"
                                id="page-identifier"
                                prop:value=move || {
                                    vm.store
                                        .with(|s| s.identifier_edit().input().unwrap_or_default().to_string())
                                }
                                on:input=move |ev| vm.set_identifier_input(event_target_value(&ev))
                            />
                            <button
                                class="button button--icon"
                                title="Сохранить"
                                disabled=move || vm.store.with(|s| s.is_saving_identifier())
                                on:click=move |_| vm.save_identifier()
                            >
                                {icon("check")}
                            </button>
                            <button
                                class="button button--icon"
                                title="Отмена"
                                on:click=move |_| vm.cancel_identifier_edit()
                            >
                                {icon("x")}
                            </button>
                        </div>
                    }
                        .into_any()
                }
            }}
            {error_line(vm, FieldPath::PageIdentifier)}
        </div>
    }
}

/// Карточка поля: заголовок и виджет содержимого по типу
#[component]
fn FieldCard(vm: PageEditVm, index: usize) -> impl IntoView {
    let field_type = Memo::new(move |_| {
        vm.store
            .with(|s| s.field(index).map(|f| f.field_type()).unwrap_or(FieldType::Text))
    });
    let title = move || {
        vm.store.with(|s| {
            s.field(index)
                .map(|f| {
                    if f.name.is_empty() {
                        format!("Поле {}", index + 1)
                    } else {
                        f.name.clone()
                    }
                })
                .unwrap_or_default()
        })
    };
    let content = move || {
        vm.store
            .with(|s| s.field(index).map(|f| f.content().to_string()).unwrap_or_default())
    };
    let has_errors = move || vm.store.with(|s| s.errors().has_field_errors(index));

    view! {
        <div class="field-card" class:invalid=has_errors>
            <div class="field-card__header">
                <span class="field-card__title">{title}</span>
                <span class="field-card__type">{move || field_type.get().label()}</span>
                <button class="button button--icon" title="Настроить" on:click=move |_| vm.open_field(index)>
                    {icon("settings")}
                </button>
                <button class="button button--icon" title="Удалить" on:click=move |_| vm.remove_field(index)>
                    {icon("trash")}
                </button>
            </div>
            <div class="field-card__body">
                {move || match field_type.get() {
                    FieldType::Text => view! {
                        <input
                            type="text"
                            prop:value=content
                            on:input=move |ev| vm.set_field_content(index, event_target_value(&ev))
                        />
                    }
                        .into_any(),
                    FieldType::Textarea => view! {
                        <textarea
                            rows="3"
                            prop:value=content
                            on:input=move |ev| vm.set_field_content(index, event_target_value(&ev))
                        />
                    }
                        .into_any(),
                    FieldType::TextEditor => view! {
                        <textarea
                            class="text-editor"
                            rows="8"
                            prop:value=content
                            on:input=move |ev| vm.set_field_content(index, event_target_value(&ev))
                        />
                    }
                        .into_any(),
                    FieldType::Select => view! { <SelectContent vm=vm index=index /> }.into_any(),
                }}
                {error_line(vm, FieldPath::FieldContent(index))}
            </div>
        </div>
    }
}

#[component]
fn SelectContent(vm: PageEditVm, index: usize) -> impl IntoView {
    let options = move || {
        vm.store.with(|s| {
            s.field(index)
                .ok()
                .and_then(|f| f.options())
                .map(|list| {
                    list.iter()
                        .map(|o| (o.label.clone(), o.value.clone()))
                        .collect::<Vec<_>>()
                })
                .unwrap_or_default()
        })
    };
    let content = move || {
        vm.store
            .with(|s| s.field(index).map(|f| f.content().to_string()).unwrap_or_default())
    };

    view! {
        <select
            prop:value=content
            on:change=move |ev| vm.set_field_content(index, event_target_value(&ev))
        >
            <option value="">"-- выберите --"</option>
            {move || {
                options()
                    .into_iter()
                    .map(|(label, value)| view! { <option value=value>{label}</option> })
                    .collect_view()
            }}
        </select>
    }
}

/// Настройка одного поля: имя, идентификатор, тип, варианты выбора
#[component]
fn FieldConfigModal(vm: PageEditVm, index: usize) -> impl IntoView {
    let field_type = Memo::new(move |_| {
        vm.store
            .with(|s| s.field(index).map(|f| f.field_type()).unwrap_or(FieldType::Text))
    });
    let option_count = Memo::new(move |_| {
        vm.store.with(|s| {
            s.field(index)
                .ok()
                .and_then(|f| f.options())
                .map(|o| o.len())
                .unwrap_or(0)
        })
    });
    let title = Signal::derive(move || format!("Настройка поля {}", index + 1));
    let on_close = Callback::new(move |_| vm.finish_field());

    view! {
        <Modal title=title on_close=on_close>
            <div class="form-group">
                <label>"Название поля"</label>
                <input
                    type="text"
                    prop:value=move || vm.store.with(|s| s.field(index).map(|f| f.name.clone()).unwrap_or_default())
                    on:input=move |ev| vm.set_field_name(index, event_target_value(&ev))
                />
                {error_line(vm, FieldPath::FieldName(index))}
            </div>

            <div class="form-group">
                <label>"Идентификатор поля"</label>
                <input
                    type="text"
                    prop:value=move || vm.store.with(|s| s.field(index).map(|f| f.identifier.clone()).unwrap_or_default())
                    on:input=move |ev| vm.set_field_identifier(index, event_target_value(&ev))
                />
                {error_line(vm, FieldPath::FieldIdentifier(index))}
            </div>

            <div class="form-group">
                <label>"Тип поля"</label>
                <select
                    prop:value=move || field_type.get().as_str()
                    on:change=move |ev| vm.set_field_type(index, &event_target_value(&ev))
                >
                    {FieldType::ALL
                        .into_iter()
                        .map(|t| view! { <option value=t.as_str()>{t.label()}</option> })
                        .collect_view()}
                </select>
            </div>

            {move || (field_type.get() == FieldType::Select).then(|| view! {
                <div class="form-group select-options">
                    <label>"Варианты"</label>
                    {move || {
                        let count = option_count.get();
                        if count == 0 {
                            return view! {
                                <button class="btn btn-secondary" on:click=move |_| vm.add_option(index)>
                                    {icon("plus")}
                                    "Добавить вариант"
                                </button>
                            }
                                .into_any();
                        }
                        (0..count)
                            .map(|j| view! { <OptionRow vm=vm index=index option=j is_last={j + 1 == count} /> })
                            .collect_view()
                            .into_any()
                    }}
                    {error_line(vm, FieldPath::FieldContent(index))}
                </div>
            })}

            <div class="modal-actions">
                <button class="btn btn-primary" on:click=move |_| vm.finish_field()>
                    {icon("check")}
                    "Готово"
                </button>
            </div>
        </Modal>
    }
}

/// Строка варианта: "+" на последней строке, "-" на остальных
#[component]
fn OptionRow(vm: PageEditVm, index: usize, option: usize, is_last: bool) -> impl IntoView {
    let read = move |pick: fn(&contracts::domain::a001_page::editor::FieldOption) -> String| {
        vm.store.with(|s| {
            s.field(index)
                .ok()
                .and_then(|f| f.options())
                .and_then(|o| o.get(option))
                .map(pick)
                .unwrap_or_default()
        })
    };

    view! {
        <div class="option-row">
            <input
                type="text"
                placeholder="Подпись"
                prop:value=move || read(|o| o.label.clone())
                on:input=move |ev| vm.set_option_label(index, option, event_target_value(&ev))
            />
            <input
                type="text"
                placeholder="Значение"
                prop:value=move || read(|o| o.value.clone())
                on:input=move |ev| vm.set_option_value(index, option, event_target_value(&ev))
            />
            {if is_last {
                view! {
                    <button class="button button--icon" title="Добавить" on:click=move |_| vm.add_option(index)>
                        {icon("plus")}
                    </button>
                }
                    .into_any()
            } else {
                view! {
                    <button class="button button--icon" title="Удалить" on:click=move |_| vm.remove_option(index, option)>
                        {icon("minus")}
                    </button>
                }
                    .into_any()
            }}
            {error_line(vm, FieldPath::OptionLabel(index, option))}
            {error_line(vm, FieldPath::OptionValue(index, option))}
        </div>
    }
}
