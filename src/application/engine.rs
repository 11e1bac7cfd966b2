use crate::application::selector::CharitySelector;
use crate::domain::amount;
use crate::domain::donation::{DonationReceipt, DonationRequest};
use crate::domain::gateway::ChargeRequest;
use crate::domain::policy::DonationPolicy;
use crate::domain::ports::{
    CharityStoreBox, CreditLedger, CreditLedgerBox, PaymentGateway, PaymentGatewayBox,
};
use crate::error::{DonationError, DonationFailure};
use rand::rngs::StdRng;

/// The main entry point for processing donations.
///
/// `DonationEngine` runs each request through a linear pipeline: token
/// presence, amount normalization, charity selection, minimum threshold,
/// gateway charge, and a single ledger credit once the charge is confirmed
/// paid. Every failure short-circuits the rest; nothing is retried.
pub struct DonationEngine {
    selector: CharitySelector,
    ledger: CreditLedgerBox,
    gateway: PaymentGatewayBox,
    policy: DonationPolicy,
}

impl DonationEngine {
    pub fn new(
        charities: CharityStoreBox,
        ledger: CreditLedgerBox,
        gateway: PaymentGatewayBox,
        policy: DonationPolicy,
    ) -> Self {
        Self {
            selector: CharitySelector::new(charities),
            ledger,
            gateway,
            policy,
        }
    }

    /// Same as [`DonationEngine::new`] but with a seeded RNG driving random
    /// charity selection, for reproducible runs.
    pub fn with_rng(
        charities: CharityStoreBox,
        ledger: CreditLedgerBox,
        gateway: PaymentGatewayBox,
        policy: DonationPolicy,
        rng: StdRng,
    ) -> Self {
        Self {
            selector: CharitySelector::with_rng(charities, rng),
            ledger,
            gateway,
            policy,
        }
    }

    /// Processes one donation end to end.
    ///
    /// A charity's total changes if and only if the gateway confirmed the
    /// charge as paid, and then by exactly the charged amount. The engine
    /// performs no compensating refund when the credit itself fails; that
    /// is an operational concern outside this pipeline.
    pub async fn donate(
        &self,
        request: DonationRequest,
    ) -> Result<DonationReceipt, DonationFailure> {
        if request.token.trim().is_empty() {
            tracing::warn!("donation rejected: missing payment token");
            return Err(DonationError::MissingToken.into());
        }

        // Amount, charity and threshold are judged together so that any
        // rejection among them can still surface the attempted credential.
        let amount = amount::normalize(&request.amount, self.policy.minor_unit_factor);
        let charity = self.selector.select(&request.charity).await;
        let (amount, charity) = match (amount, charity) {
            (Ok(amount), Ok(charity)) if amount > self.policy.minimum => (amount, charity),
            (amount, charity) => {
                let reason = match (amount, charity) {
                    (Err(err), _) => DonationError::InvalidAmount(err),
                    (_, Err(err)) => err,
                    (Ok(amount), Ok(_)) => DonationError::BelowMinimum {
                        amount: amount.get(),
                        minimum: self.policy.minimum.get(),
                    },
                };
                return Err(self.rejection(reason, &request.token).await);
            }
        };

        let charge = self
            .gateway
            .create_charge(ChargeRequest {
                amount,
                currency: self.policy.currency.clone(),
                token: request.token.clone(),
                description: format!("Donation to {} [{}]", charity.name, charity.id),
            })
            .await
            .map_err(|err| {
                tracing::warn!(code = %err.code, "gateway failed the charge");
                DonationError::Gateway {
                    code: err.code,
                    message: err.message,
                }
            })?;

        if !charge.paid {
            tracing::warn!(charity = charity.id, "charge came back unpaid");
            return Err(DonationError::NotPaid.into());
        }

        // The only ledger touch in the pipeline, exactly once per call.
        let new_total = self
            .ledger
            .credit(charity.id, charge.amount)
            .await
            .map_err(|err| match err {
                ledger @ DonationError::Ledger(_) => ledger,
                other => DonationError::Ledger(other.to_string()),
            })?;

        tracing::info!(
            charity = charity.id,
            amount = charge.amount.get(),
            total = new_total.get(),
            "donation credited"
        );

        Ok(DonationReceipt {
            charity_id: charity.id,
            charity_name: charity.name,
            amount: charge.amount,
            new_total,
        })
    }

    async fn rejection(&self, reason: DonationError, token: &str) -> DonationFailure {
        tracing::warn!(%reason, "donation rejected");
        // Best effort: failure reporting never depends on this succeeding.
        let credential = self.gateway.retrieve_credential(token).await.ok();
        DonationFailure { reason, credential }
    }
}
