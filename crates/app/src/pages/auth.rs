//! Sign-in, registration and sign-out.

use storefront::{
    cart::CartStorage,
    checkout::Route,
    forms::{FormErrors, LoginForm, RegisterForm},
};

use crate::{
    api::{Credentials, NewAccount},
    context::AppContext,
    pages::{Notice, PageOutcome},
};

fn after_sign_in(redirect: Option<Route>) -> PageOutcome {
    PageOutcome::navigate(redirect.unwrap_or(Route::Home))
}

/// Sign in and continue to `redirect`, or the listing.
///
/// A visitor who is already signed in is forwarded straight away.
///
/// # Errors
///
/// Returns the per-field messages when the form is invalid.
pub async fn sign_in<S: CartStorage>(
    ctx: &mut AppContext<S>,
    form: LoginForm,
    redirect: Option<Route>,
) -> Result<PageOutcome, FormErrors> {
    if ctx.session().is_some() {
        return Ok(after_sign_in(redirect));
    }

    form.check()?;

    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    match ctx.api.sign_in(credentials).await {
        Ok(session) => {
            ctx.sign_in(session);

            Ok(after_sign_in(redirect))
        }
        Err(error) => Ok(PageOutcome::notify(Notice::error(error.user_message()))),
    }
}

/// Create an account, sign in with it and continue to `redirect`.
///
/// # Errors
///
/// Returns the per-field messages when the form is invalid.
pub async fn register<S: CartStorage>(
    ctx: &mut AppContext<S>,
    form: RegisterForm,
    redirect: Option<Route>,
) -> Result<PageOutcome, FormErrors> {
    if ctx.session().is_some() {
        return Ok(after_sign_in(redirect));
    }

    form.check()?;

    let account = NewAccount {
        name: form.name,
        email: form.email.clone(),
        password: form.password.clone(),
    };

    if let Err(error) = ctx.api.sign_up(account).await {
        return Ok(PageOutcome::notify(Notice::error(error.user_message())));
    }

    let credentials = Credentials {
        email: form.email,
        password: form.password,
    };

    match ctx.api.sign_in(credentials).await {
        Ok(session) => {
            ctx.sign_in(session);

            Ok(after_sign_in(redirect))
        }
        Err(error) => Ok(PageOutcome::notify(Notice::error(error.user_message()))),
    }
}

/// Drop the session and open the sign-in page.
pub fn sign_out<S: CartStorage>(ctx: &mut AppContext<S>) -> PageOutcome {
    ctx.sign_out();

    PageOutcome::navigate(Route::Login { redirect: None })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        api::{ApiError, MockStorefrontApi},
        test::{context, session, signed_in},
    };

    use super::*;

    fn login() -> LoginForm {
        LoginForm {
            email: "maria@example.com".to_string(),
            password: "segredo1".to_string(),
        }
    }

    fn registration() -> RegisterForm {
        RegisterForm {
            name: "Maria Silva".to_string(),
            email: "maria@example.com".to_string(),
            password: "segredo1".to_string(),
            confirm_password: "segredo1".to_string(),
        }
    }

    #[tokio::test]
    async fn sign_in_follows_redirect() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_sign_in()
            .once()
            .withf(|credentials| credentials.email == "maria@example.com")
            .return_once(|_| Ok(session(false)));

        let mut ctx = context(api);

        let outcome = sign_in(&mut ctx, login(), Some(Route::Shipping)).await?;

        assert_eq!(outcome, PageOutcome::navigate(Route::Shipping));
        assert_eq!(ctx.user().map(|user| user.name.as_str()), Some("Maria Silva"));

        Ok(())
    }

    #[tokio::test]
    async fn signed_in_visitor_is_forwarded() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_sign_in().never();

        let mut ctx = signed_in(api);

        let outcome = sign_in(&mut ctx, LoginForm::default(), None).await?;

        assert_eq!(outcome, PageOutcome::navigate(Route::Home));

        Ok(())
    }

    #[tokio::test]
    async fn invalid_form_is_not_sent() {
        let mut api = MockStorefrontApi::new();

        api.expect_sign_in().never();

        let mut ctx = context(api);
        let form = LoginForm {
            password: "123".to_string(),
            ..login()
        };

        let errors = sign_in(&mut ctx, form, None).await.err().unwrap_or_default();

        assert!(errors.get("password").is_some());
    }

    #[tokio::test]
    async fn rejected_credentials_show_notice() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_sign_in().once().return_once(|_| {
            Err(ApiError::Status {
                status: 401,
                message: "Email ou senha inválidos".to_string(),
            })
        });

        let mut ctx = context(api);

        let outcome = sign_in(&mut ctx, login(), None).await?;

        assert_eq!(outcome.notice, Some(Notice::error("Email ou senha inválidos")));
        assert!(ctx.session().is_none());

        Ok(())
    }

    #[tokio::test]
    async fn register_signs_up_then_in() -> TestResult {
        let mut api = MockStorefrontApi::new();
        let mut sequence = mockall::Sequence::new();

        api.expect_sign_up()
            .once()
            .in_sequence(&mut sequence)
            .withf(|account| account.name == "Maria Silva")
            .return_once(|_| Ok(()));
        api.expect_sign_in()
            .once()
            .in_sequence(&mut sequence)
            .return_once(|_| Ok(session(false)));

        let mut ctx = context(api);

        let outcome = register(&mut ctx, registration(), None).await?;

        assert_eq!(outcome, PageOutcome::navigate(Route::Home));
        assert!(ctx.session().is_some());

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_account_is_reported() -> TestResult {
        let mut api = MockStorefrontApi::new();

        api.expect_sign_up().once().return_once(|_| {
            Err(ApiError::Status {
                status: 422,
                message: "Usuário já existe".to_string(),
            })
        });
        api.expect_sign_in().never();

        let mut ctx = context(api);

        let outcome = register(&mut ctx, registration(), None).await?;

        assert_eq!(outcome.notice, Some(Notice::error("Usuário já existe")));

        Ok(())
    }

    #[test]
    fn sign_out_drops_session() {
        let mut ctx = signed_in(MockStorefrontApi::new());

        let outcome = sign_out(&mut ctx);

        assert!(ctx.session().is_none());
        assert_eq!(outcome, PageOutcome::navigate(Route::Login { redirect: None }));
    }
}
