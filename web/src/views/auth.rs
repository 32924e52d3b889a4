use leptos::{prelude::*, task::spawn_local};
use shared_types::AccountCredentials;
use thaw::{Button, ButtonType, Input, InputType, Label, LabelSize};

use crate::api::LairApi;
use crate::session;

#[derive(Debug, Clone, Copy, PartialEq)]
enum AccountMode {
    Login,
    Register,
}

/// Account panel with a two-state visibility toggle driven by `open`.
/// Login and registration share the form; the selected mode decides which
/// endpoint the submission hits. A granted token goes straight into the
/// session store and the panel closes; errors keep it open.
#[component]
pub fn AccountPanel(open: RwSignal<bool>) -> impl IntoView {
    let mode = RwSignal::new(AccountMode::Login);
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error_message = RwSignal::new(None::<String>);
    let signed_in = RwSignal::new(false);

    // Re-read the cookie whenever the panel opens.
    Effect::new(move |_| {
        if open.get() {
            signed_in.set(session::get().is_some());
        }
    });

    let is_button_disabled =
        Memo::new(move |_| full_name.get().is_empty() || password.get().is_empty());

    let submit = move |_| {
        loading.set(true);
        error_message.set(None);

        let credentials = AccountCredentials {
            full_name: full_name.get(),
            password: password.get(),
        };
        let selected = mode.get();

        spawn_local(async move {
            let api = LairApi::default();
            let result = match selected {
                AccountMode::Login => api.login(&credentials).await,
                AccountMode::Register => api.register(&credentials).await,
            };

            match result {
                Ok(grant) => {
                    session::set(&grant.cookie);
                    signed_in.set(true);
                    open.set(false);
                }
                Err(e) => error_message.set(Some(e.to_string())),
            }
            loading.set(false);
        });
    };

    let sign_out = move |_| {
        session::clear();
        signed_in.set(false);
    };

    view! {
        {move || {
            if !open.get() {
                return view! {}.into_any();
            }

            view! {
                <div class="account-backdrop">
                    <div class="account-card">
                        <button class="account-close" on:click=move |_| open.set(false)>
                            "✕"
                        </button>

                        <Label size=LabelSize::Large>"Your account"</Label>

                        {move || {
                            if signed_in.get() {
                                view! {
                                    <div class="account-signed-in">
                                        <p>"You are signed in."</p>
                                        <Button on_click=sign_out>"Sign out"</Button>
                                    </div>
                                }
                                    .into_any()
                            } else {
                                view! {}.into_any()
                            }
                        }}

                        <div class="account-mode-toggle">
                            <button
                                class=move || {
                                    if mode.get() == AccountMode::Login {
                                        "account-toggle-btn account-active"
                                    } else {
                                        "account-toggle-btn"
                                    }
                                }
                                on:click=move |_| mode.set(AccountMode::Login)
                            >
                                "Sign in"
                            </button>
                            <button
                                class=move || {
                                    if mode.get() == AccountMode::Register {
                                        "account-toggle-btn account-active"
                                    } else {
                                        "account-toggle-btn"
                                    }
                                }
                                on:click=move |_| mode.set(AccountMode::Register)
                            >
                                "Create account"
                            </button>
                        </div>

                        <form on:submit=move |ev| {
                            ev.prevent_default();
                            submit(());
                        }>
                            <div class="account-form-group">
                                <Input placeholder="Full name" value=full_name />
                            </div>
                            <div class="account-form-group">
                                <Input
                                    placeholder="Password"
                                    input_type=InputType::Password
                                    value=password
                                />
                            </div>

                            {move || error_message.get().map(|msg| view! {
                                <div class="account-error-message">{msg}</div>
                            })}

                            <Button
                                class="account-submit-btn"
                                button_type=ButtonType::Submit
                                loading=Signal::from(loading)
                                disabled=Signal::from(is_button_disabled)
                            >
                                {move || match mode.get() {
                                    AccountMode::Login => "Sign in",
                                    AccountMode::Register => "Create account",
                                }}
                            </Button>
                        </form>
                    </div>
                </div>
            }
                .into_any()
        }}
    }
}
