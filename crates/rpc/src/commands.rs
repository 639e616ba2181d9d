//! CLI commands

use gatekeeper_core::{Height, Identity, PolicyId};
use gatekeeper_policy::PolicyDraft;

use crate::context::GateContext;

/// Grant officer privilege to an identity
pub fn grant_officer(
    ctx: &mut GateContext,
    caller: &Identity,
    target: &Identity,
    height: Height,
) -> Result<(), anyhow::Error> {
    ctx.gate_mut()
        .grant_officer(caller, target.clone(), height)?;
    ctx.save()?;

    println!("✅ Granted officer privilege to {} (height: {})", target, height);
    Ok(())
}

/// Create a policy
#[allow(clippy::too_many_arguments)]
pub fn create_policy(
    ctx: &mut GateContext,
    caller: &Identity,
    name: &str,
    level: u8,
    duration: u64,
    min_reputation: u32,
    max_violations: u32,
    height: Height,
) -> Result<(), anyhow::Error> {
    let draft = PolicyDraft {
        name: name.to_string(),
        required_level: level,
        duration,
        min_reputation,
        max_violations,
    };
    let id = ctx.gate_mut().create_policy(caller, draft, height)?;
    ctx.save()?;

    println!(
        "✅ Created policy {} '{}' (expires at height {})",
        id,
        name,
        height.saturating_add(duration)
    );
    Ok(())
}

/// Register an identity with starter standing
pub fn register(
    ctx: &mut GateContext,
    identity: &Identity,
    height: Height,
) -> Result<(), anyhow::Error> {
    ctx.gate_mut().register_identity(identity.clone(), height)?;
    ctx.save()?;

    println!("✅ Registered {} (height: {})", identity, height);
    Ok(())
}

/// Overwrite an identity's compliance standing
#[allow(clippy::too_many_arguments)]
pub fn update_compliance(
    ctx: &mut GateContext,
    caller: &Identity,
    identity: &Identity,
    level: u8,
    reputation: u32,
    window: u64,
    height: Height,
) -> Result<(), anyhow::Error> {
    ctx.gate_mut()
        .update_compliance(caller, identity, level, reputation, window, height)?;
    ctx.save()?;

    println!(
        "✅ Updated {} to level {}, reputation {} (verified at height {})",
        identity, level, reputation, height
    );
    Ok(())
}

/// Record a violation against a subject
#[allow(clippy::too_many_arguments)]
pub fn record_violation(
    ctx: &mut GateContext,
    caller: &Identity,
    subject: &Identity,
    policy: PolicyId,
    kind: &str,
    severity: u8,
    height: Height,
) -> Result<(), anyhow::Error> {
    let id = ctx
        .gate_mut()
        .record_violation(caller, subject, policy, kind, severity, height)?;
    ctx.save()?;

    println!(
        "✅ Recorded violation {} against {} (policy {}, severity {})",
        id, subject, policy, severity
    );
    Ok(())
}

/// Grant a discretionary approval for a (subject, policy) pair
pub fn approve(
    ctx: &mut GateContext,
    caller: &Identity,
    subject: &Identity,
    policy: PolicyId,
    duration: u64,
    height: Height,
) -> Result<(), anyhow::Error> {
    ctx.gate_mut()
        .approve_for_policy(caller, subject, policy, duration, height)?;
    ctx.save()?;

    println!(
        "✅ Approved {} for policy {} (expires at height {})",
        subject,
        policy,
        height.saturating_add(duration)
    );
    Ok(())
}

/// Run the lightweight compliance query
pub fn verify(
    ctx: &GateContext,
    identity: &Identity,
    policy: PolicyId,
    height: Height,
) -> Result<(), anyhow::Error> {
    match ctx.gate().verify_compliance(identity, policy, height) {
        Ok(()) => println!("✅ {} is compliant with policy {}", identity, policy),
        Err(e) => println!("❌ Rejected [{}]: {}", e.code(), e),
    }
    Ok(())
}

/// Run the full enforcement decision
pub fn enforce(
    ctx: &GateContext,
    identity: &Identity,
    policy: PolicyId,
    boost: u32,
    height: Height,
) -> Result<(), anyhow::Error> {
    match ctx
        .gate()
        .enforce_with_approval(identity, policy, boost, height)
    {
        Ok(()) => println!(
            "✅ {} cleared enforcement for policy {} (boost {})",
            identity, policy, boost
        ),
        Err(e) => println!("❌ Rejected [{}]: {}", e.code(), e),
    }
    Ok(())
}

/// Print counters across the stores
pub fn stats(ctx: &GateContext) -> Result<(), anyhow::Error> {
    let stats = ctx.gate().stats();
    println!("Officers:              {}", stats.officers);
    println!("Policies created:      {}", stats.policies_created);
    println!("Identities registered: {}", stats.identities_registered);
    println!("Violations recorded:   {}", stats.violations_recorded);
    println!("Approvals recorded:    {}", stats.approvals_recorded);
    Ok(())
}

/// Print one identity's standing and violations
pub fn show(ctx: &GateContext, identity: &Identity) -> Result<(), anyhow::Error> {
    match ctx.gate().compliance_record(identity) {
        Some(record) => {
            println!("Identity:            {}", identity);
            println!("  Level:             {}", record.level);
            println!("  Reputation:        {}", record.reputation);
            println!("  Violations:        {}", record.violation_count);
            println!("  Last verified:     {}", record.last_verified);
            println!("  Verification ends: {}", record.verification_expiry);
            println!("  Blacklisted:       {}", record.blacklisted);
        }
        None => println!("No compliance record for {}", identity),
    }

    for violation in ctx.gate().violations_for(identity) {
        println!(
            "  Violation {}: policy {}, {} (severity {}, height {})",
            violation.id, violation.policy_id, violation.kind, violation.severity, violation.recorded_at
        );
    }
    Ok(())
}
