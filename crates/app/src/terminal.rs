//! Terminal payment gateway.
//!
//! Stands in for the hosted payment widget: shows the charge and asks the
//! operator to authorise it or close the prompt.

use async_trait::async_trait;
use crumb::pricing::find_currency;
use crumb_app::gateway::{ChargeRequest, GatewayError, GatewayOutcome, PaymentGateway};
use rusty_money::Money;
use tokio::{
    io::{self, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout},
    sync::Mutex,
};

const CONFIRM: &str = "pay";

pub(crate) struct TerminalGateway<R, W> {
    input: Mutex<BufReader<R>>,
    output: Mutex<W>,
}

impl TerminalGateway<Stdin, Stdout> {
    pub(crate) fn stdio() -> Self {
        Self::new(io::stdin(), io::stdout())
    }
}

impl<R, W> TerminalGateway<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub(crate) fn new(input: R, output: W) -> Self {
        Self {
            input: Mutex::new(BufReader::new(input)),
            output: Mutex::new(output),
        }
    }

    async fn prompt(&self, charge: &ChargeRequest) -> std::io::Result<bool> {
        let amount = find_currency(&charge.currency).map_or_else(
            |_err| format!("{} {} (minor units)", charge.amount_minor, charge.currency),
            |currency| Money::from_minor(charge.amount_minor, currency).to_string(),
        );

        let summary = [
            String::new(),
            format!("Payment for {}", charge.email),
            format!("  amount:    {amount}"),
            format!("  reference: {}", charge.reference),
            format!(
                "  deliver to {}, {} ({})",
                charge.metadata.customer_name,
                charge.metadata.delivery_address,
                charge.metadata.phone
            ),
            format!("Type '{CONFIRM}' to authorise, anything else closes: "),
        ]
        .join("\n");

        let mut output = self.output.lock().await;

        output.write_all(summary.as_bytes()).await?;
        output.flush().await?;

        let mut line = String::new();
        let read = self.input.lock().await.read_line(&mut line).await?;

        Ok(read > 0 && line.trim().eq_ignore_ascii_case(CONFIRM))
    }
}

#[async_trait]
impl<R, W> PaymentGateway for TerminalGateway<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn collect(&self, charge: ChargeRequest) -> Result<GatewayOutcome, GatewayError> {
        let confirmed = self
            .prompt(&charge)
            .await
            .map_err(|error| GatewayError::Unavailable(error.to_string()))?;

        if !confirmed {
            return Ok(GatewayOutcome::Closed);
        }

        Ok(GatewayOutcome::Success {
            reference: charge.reference,
        })
    }
}

#[cfg(test)]
mod tests {
    use crumb::checkout::GatewayReference;
    use crumb_app::gateway::ChargeMetadata;
    use testresult::TestResult;

    use super::*;

    fn charge() -> ChargeRequest {
        ChargeRequest {
            email: "ada@example.com".to_string(),
            amount_minor: 3098,
            public_key: "pk_test".to_string(),
            currency: "NGN".to_string(),
            reference: GatewayReference::new("crumb_1"),
            metadata: ChargeMetadata {
                delivery_address: "12 Bakers Row, Ikeja".to_string(),
                customer_name: "Ada Obi".to_string(),
                phone: "08012345678".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn confirming_echoes_the_reference() -> TestResult {
        let gateway = TerminalGateway::new(&b"pay\n"[..], Vec::new());

        let outcome = gateway.collect(charge()).await?;

        assert_eq!(
            outcome,
            GatewayOutcome::Success {
                reference: GatewayReference::new("crumb_1")
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn anything_else_closes() -> TestResult {
        let gateway = TerminalGateway::new(&b"no thanks\n"[..], Vec::new());

        assert_eq!(gateway.collect(charge()).await?, GatewayOutcome::Closed);

        Ok(())
    }

    #[tokio::test]
    async fn end_of_input_closes() -> TestResult {
        let gateway = TerminalGateway::new(&b""[..], Vec::new());

        assert_eq!(gateway.collect(charge()).await?, GatewayOutcome::Closed);

        Ok(())
    }
}
