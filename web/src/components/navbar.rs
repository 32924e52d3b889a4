use leptos::prelude::*;

#[component]
pub fn Navbar<F>(on_account: F) -> impl IntoView
where
    F: Fn() + 'static + Copy + Send + Sync,
{
    view! {
        <nav class="navbar">
            <div class="navbar__container">
                <div class="navbar__brand">
                    <a href="/" class="navbar__logo">
                        "Lairmap"
                    </a>
                </div>

                <div class="navbar__links">
                    <button
                        class="navbar__link navbar__link--cta"
                        on:click=move |_| on_account()
                    >
                        "Account"
                    </button>
                </div>
            </div>
        </nav>
    }
}
