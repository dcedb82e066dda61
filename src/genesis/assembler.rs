// Snapshot Assembler - runs a generation plan through the registrars and checks the result

use crate::error::GenesisError;
use crate::genesis::mode::{GenerationMode, GenesisPlan};
use crate::genesis::preset::Allocation;
use crate::genesis::snapshot::{
    GenesisBlocks, PillarConfig, PlasmaConfig, Snapshot, SporkConfig, SwapConfig, TokenConfig,
};
use crate::identity::{contracts, Address};
use crate::ledger::{BalanceLedger, PoolKind, TokenRegistry, TokenStandard};
use crate::registrar::{DelegateRegistrar, FeatureFlagRegistrar, FusionRegistrar, RewardSplit};
use tracing::info;

/// Builder state of one generation run. Consumed by [`SnapshotAssembler::finish`].
#[derive(Debug, Default)]
pub struct SnapshotAssembler {
    tokens: TokenRegistry,
    ledger: BalanceLedger,
    delegates: DelegateRegistrar,
    fusions: FusionRegistrar,
    flags: FeatureFlagRegistrar,
}

impl SnapshotAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and verify the snapshot for `mode`. Either the whole snapshot is
    /// returned or nothing is.
    pub fn assemble(mode: &GenerationMode, timestamp: i64) -> Result<Snapshot, GenesisError> {
        let plan = mode.plan()?;
        info!(
            preset = plan.preset.name,
            chain = plan.preset.chain_identifier,
            delegates = plan.delegates.len(),
            credits = plan.credits.len(),
            fusions = plan.fusions.len(),
            "assembling genesis snapshot"
        );

        let mut assembler = Self::new();
        assembler.build(&plan)?;
        let snapshot = assembler.finish(&plan, timestamp);
        snapshot.verify()?;

        info!(
            balances = snapshot.balances().len(),
            flags = snapshot.feature_flags().len(),
            "genesis snapshot verified"
        );
        Ok(snapshot)
    }

    /// Execute every step of a plan. The steps are identical for all modes.
    pub fn build(&mut self, plan: &GenesisPlan) -> Result<(), GenesisError> {
        let token_a = plan.preset.token_a.standard;
        let token_b = plan.preset.token_b.standard;

        for definition in plan.preset.token_definitions() {
            self.tokens.initialize(definition)?;
        }

        self.flags.apply_preset(plan.preset.flag_preset)?;
        for flag in &plan.flag_overrides {
            self.flags.set_activation(&flag.id, flag.activated)?;
        }
        info!(count = self.flags.flags().len(), "registered feature flags");

        self.credit_both(
            contracts::ACCELERATOR,
            plan.preset.accelerator_allocation,
            token_a,
            token_b,
        )?;

        for delegate in &plan.delegates {
            self.delegates.register_delegate(
                &mut self.ledger,
                &mut self.tokens,
                token_a,
                &delegate.registration,
                delegate.stake,
                RewardSplit::default(),
            )?;
        }
        info!(
            count = self.delegates.len(),
            stake = %self.ledger.pool_total(PoolKind::DelegateStake, &token_a),
            "registered delegates"
        );

        for credit in &plan.credits {
            self.credit_both(credit.address, credit.allocation, token_a, token_b)?;
        }

        for fusion in &plan.fusions {
            self.fusions.register_fusion(
                &mut self.ledger,
                &mut self.tokens,
                token_b,
                fusion.owner,
                fusion.beneficiary,
                fusion.amount,
                fusion.role,
            )?;
        }
        info!(
            count = self.fusions.len(),
            fused = %self.ledger.pool_total(PoolKind::Fusion, &token_b),
            "registered fusions"
        );
        Ok(())
    }

    /// Freeze the builders into a snapshot. Pool rows are emitted here.
    pub fn finish(self, plan: &GenesisPlan, timestamp: i64) -> Snapshot {
        Snapshot {
            chain_identifier: plan.preset.chain_identifier,
            extra_data: plan.preset.extra_data.clone(),
            genesis_timestamp_sec: timestamp,
            spork_address: plan.flag_authority,
            pillar_config: PillarConfig::new(self.delegates.into_delegates()),
            token_config: TokenConfig {
                tokens: self.tokens.into_definitions(),
            },
            plasma_config: PlasmaConfig {
                fusions: self.fusions.into_fusions(),
            },
            swap_config: SwapConfig::default(),
            spork_config: SporkConfig {
                sporks: self.flags.into_flags(),
            },
            genesis_blocks: GenesisBlocks {
                blocks: self.ledger.finalize(),
            },
        }
    }

    fn credit_both(
        &mut self,
        address: Address,
        allocation: Allocation,
        token_a: TokenStandard,
        token_b: TokenStandard,
    ) -> Result<(), GenesisError> {
        self.ledger
            .credit(&mut self.tokens, address, token_a, allocation.amount_a)?;
        self.ledger
            .credit(&mut self.tokens, address, token_b, allocation.amount_b)?;
        Ok(())
    }
}
