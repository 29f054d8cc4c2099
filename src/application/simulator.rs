use std::time::Duration;

pub const INITIAL_MESSAGE: &str = "Iniciando proceso de pago...";

pub const PROCESSING_STEPS: [&str; 5] = [
    "Validando datos del cliente...",
    "Conectando con el banco...",
    "Verificando fondos...",
    "Procesando transacción...",
    "Confirmando pago...",
];

/// Plays the PSE processing sequence: a fixed pause, then the next status line.
#[derive(Debug, Clone)]
pub struct PaymentSimulator {
    step_delay: Duration,
}

impl PaymentSimulator {
    pub fn new(step_delay: Duration) -> Self {
        Self { step_delay }
    }

    pub async fn run<F>(&self, mut on_step: F)
    where
        F: FnMut(&'static str),
    {
        for (index, step) in PROCESSING_STEPS.into_iter().enumerate() {
            tokio::time::sleep(self.step_delay).await;
            tracing::debug!(step = index + 1, status = step, "simulated payment step");
            on_step(step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_steps_run_in_order_with_delay() {
        let simulator = PaymentSimulator::new(Duration::from_secs(1));
        let started = Instant::now();
        let mut seen = Vec::new();

        simulator
            .run(|step| seen.push((step, started.elapsed().as_secs())))
            .await;

        let expected: Vec<(&str, u64)> = PROCESSING_STEPS
            .iter()
            .enumerate()
            .map(|(i, step)| (*step, i as u64 + 1))
            .collect();
        assert_eq!(seen, expected);
    }
}
