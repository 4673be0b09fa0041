use std::future::IntoFuture;

// Original: https://github.com/HalsekiRaika/architectured/blob/e5caa5c7ae801d1aaac6e275b3ea0ef26d6ff26b/server/src/controller.rs
pub trait Intake<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub trait TryIntake<I>: 'static + Sync + Send {
    type To;
    type Error;
    fn emit(&self, input: I) -> Result<Self::To, Self::Error>;
}

pub trait Exhaust<I>: 'static + Sync + Send {
    type To;
    fn emit(&self, input: I) -> Self::To;
}

pub struct Controller<T, P> {
    transformer: T,
    presenter: P,
}

impl<T, P> Controller<T, P> {
    pub fn new(transformer: T, presenter: P) -> Self {
        Self {
            transformer,
            presenter,
        }
    }

    pub fn intake<I>(self, input: I) -> Transformed<P, T::To>
    where
        T: Intake<I>,
    {
        Transformed {
            transformed: Intake::emit(&self.transformer, input),
            presenter: self.presenter,
        }
    }

    pub fn try_intake<I>(self, input: I) -> Result<Transformed<P, T::To>, T::Error>
    where
        T: TryIntake<I>,
    {
        Ok(Transformed {
            transformed: TryIntake::emit(&self.transformer, input)?,
            presenter: self.presenter,
        })
    }
}

impl<P> Controller<(), P> {
    /// Runs an operation that takes no request input.
    pub async fn bypass<F, Fut, O>(self, f: F) -> P::To
    where
        P: Exhaust<O>,
        F: FnOnce() -> Fut,
        Fut: IntoFuture<Output = O>,
    {
        self.presenter.emit(f().await)
    }
}

pub struct Transformed<P, D> {
    transformed: D,
    presenter: P,
}

impl<P, D> Transformed<P, D> {
    pub async fn handle<F, Fut, O>(self, f: F) -> P::To
    where
        P: Exhaust<O>,
        F: FnOnce(D) -> Fut,
        Fut: IntoFuture<Output = O>,
    {
        self.presenter.emit(f(self.transformed).await)
    }
}

#[cfg(test)]
mod test {
    use super::{Controller, Exhaust, Intake, TryIntake};

    struct Doubler;

    impl Intake<i32> for Doubler {
        type To = i32;
        fn emit(&self, input: i32) -> Self::To {
            input * 2
        }
    }

    impl TryIntake<&'static str> for Doubler {
        type To = i32;
        type Error = String;
        fn emit(&self, input: &'static str) -> Result<Self::To, Self::Error> {
            input
                .parse::<i32>()
                .map(|value| value * 2)
                .map_err(|e| e.to_string())
        }
    }

    struct Printer;

    impl Exhaust<i32> for Printer {
        type To = String;
        fn emit(&self, input: i32) -> Self::To {
            format!("={input}")
        }
    }

    #[tokio::test]
    async fn pipes_input_through_operation() {
        let out = Controller::new(Doubler, Printer)
            .intake(4)
            .handle(|value| async move { value + 1 })
            .await;
        assert_eq!(out, "=9");

        let out = Controller::new((), Printer).bypass(|| async { 7 }).await;
        assert_eq!(out, "=7");
    }

    #[tokio::test]
    async fn rejects_before_operation() {
        let rejected = Controller::new(Doubler, Printer).try_intake("x");
        assert!(rejected.is_err());

        let out = Controller::new(Doubler, Printer)
            .try_intake("5")
            .unwrap()
            .handle(|value| async move { value })
            .await;
        assert_eq!(out, "=10");
    }
}
