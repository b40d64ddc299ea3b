use crate::app::AppServices;
use crate::contact::{ContactSession, Field, SubmitStatus};
use dioxus::prelude::*;

#[component]
pub fn ContactView() -> Element {
    let services = use_context::<AppServices>();
    let mut session = use_signal(ContactSession::new);

    let current = session();
    let sending = current.status == SubmitStatus::Sending;

    rsx! {
        section { class: "contact",
            h2 { "Get In ", span { class: "gradient-text", "Touch" } }
            form {
                class: "contact-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    let relay = services.relay.clone();
                    spawn(async move {
                        let Some(relay) = relay else {
                            session.write().status =
                                SubmitStatus::Failed("Contact form is not configured.".to_string());
                            return;
                        };
                        let mut draft = session();
                        draft.status = SubmitStatus::Sending;
                        session.set(draft.clone());
                        let _ = draft.submit(relay.as_ref()).await;
                        session.set(draft);
                    });
                },
                FormField {
                    label: "Name",
                    value: current.form.name.clone(),
                    error: current.error_for(Field::Name),
                    oninput: move |value: String| session.write().form.name = value,
                }
                FormField {
                    label: "Email",
                    value: current.form.email.clone(),
                    error: current.error_for(Field::Email),
                    oninput: move |value: String| session.write().form.email = value,
                }
                FormField {
                    label: "Subject",
                    value: current.form.subject.clone(),
                    error: current.error_for(Field::Subject),
                    oninput: move |value: String| session.write().form.subject = value,
                }
                div { class: "form-field",
                    label { "Message" }
                    textarea {
                        rows: "6",
                        value: "{current.form.message}",
                        oninput: move |evt: FormEvent| session.write().form.message = evt.value(),
                    }
                    {current.error_for(Field::Message).map(|error| rsx! {
                        span { class: "field-error", "{error}" }
                    })}
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: sending,
                    if sending { "Sending..." } else { "Send Message" }
                }
            }
            StatusMessage { status: current.status.clone(), session }
        }
    }
}

#[component]
fn FormField(
    label: &'static str,
    value: String,
    error: Option<&'static str>,
    oninput: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "form-field",
            label { "{label}" }
            input {
                value: "{value}",
                oninput: move |evt: FormEvent| oninput.call(evt.value()),
            }
            {error.map(|error| rsx! {
                span { class: "field-error", "{error}" }
            })}
        }
    }
}

#[component]
fn StatusMessage(status: SubmitStatus, session: Signal<ContactSession>) -> Element {
    let mut session = session;
    let (class, text) = match &status {
        SubmitStatus::Sent => (
            "status success",
            "Message sent successfully! I'll get back to you soon.".to_string(),
        ),
        SubmitStatus::Failed(reason) => (
            "status error",
            format!("Failed to send message. Please try again. ({reason})"),
        ),
        SubmitStatus::Idle | SubmitStatus::Sending => return rsx! {},
    };
    rsx! {
        div { class: class, role: "status",
            span { "{text}" }
            button {
                class: "btn btn-ghost",
                r#type: "button",
                onclick: move |_| session.write().dismiss_status(),
                "Dismiss"
            }
        }
    }
}
