//! Chat-command surface over the controller
//!
//! Hosts forward tokenized chat arguments here: `fund <acronym> [amount]`,
//! `totalfund <acronym>`, and `refund [acronym]`. Each handler resolves its
//! arguments, runs the matching controller operation, and pages refusals
//! back to the issuing contributor verbatim. The return value says whether
//! the command went through.

use crate::controller::RestorationController;
use crate::host::GameHost;
use reclaim_types::{Acronym, ContributorId, Credits, FundingError, FundingResult, TeamId};

/// Parse a chat-command credit amount.
///
/// Amounts are whole positive credits; anything else is an
/// [`FundingError::InvalidAmount`] carrying the raw token.
pub fn parse_amount(token: &str) -> FundingResult<Credits> {
    match token.parse::<i32>() {
        Ok(amount) if amount > 0 => Ok(Credits::new(amount as f32)),
        _ => Err(FundingError::InvalidAmount(token.to_string())),
    }
}

impl<H: GameHost> RestorationController<H> {
    /// Handle `fund <acronym> [amount]`.
    ///
    /// Without an amount the contributor offers their whole balance.
    pub fn handle_fund(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        args: &[&str],
    ) -> bool {
        let acronym = Acronym::new(args.first().copied().unwrap_or_default());
        let requested = match args.get(1) {
            Some(token) => match parse_amount(token) {
                Ok(amount) => Some(amount),
                Err(error) => {
                    self.host().page(contributor, &error.to_string());
                    return false;
                }
            },
            None => None,
        };

        match self.contribute(contributor, team, &acronym, requested) {
            Ok(_) => true,
            Err(error) => {
                self.host().page(contributor, &error.to_string());
                false
            }
        }
    }

    /// Handle `totalfund <acronym>`
    pub fn handle_fund_status(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        args: &[&str],
    ) -> bool {
        let acronym = Acronym::new(args.first().copied().unwrap_or_default());
        match self.fund_status(contributor, team, &acronym) {
            Ok(_) => true,
            Err(error) => {
                self.host().page(contributor, &error.to_string());
                false
            }
        }
    }

    /// Handle `refund [acronym]`.
    ///
    /// Without an acronym every ledger the contributor has a balance on is
    /// refunded.
    pub fn handle_refund(
        &mut self,
        contributor: &ContributorId,
        team: TeamId,
        args: &[&str],
    ) -> bool {
        let acronym = args.first().map(|token| Acronym::new(*token));
        match self.refund(contributor, team, acronym.as_ref()) {
            Ok(_) => true,
            Err(error) => {
                self.host().page(contributor, &error.to_string());
                false
            }
        }
    }
}
