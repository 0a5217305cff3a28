use super::model::{Category, Domain, Framework, Process};

impl Framework {
    /// The built-in IT capability taxonomy used when no custom framework is configured.
    pub fn standard() -> Self {
        Self {
            domains: standard_domains(),
        }
    }
}

fn standard_domains() -> Vec<Domain> {
    vec![
        Domain::new(
            "plan-strategy",
            "Plan strategy",
            "Strategic planning and alignment processes",
            vec![
                Category::new(
                    "it-strategy",
                    "IT STRATEGY",
                    vec![
                        Process::new(
                            "align-it-strategy-with-business-objectives",
                            "Align IT Strategy with business objectives",
                        ),
                        Process::new(
                            "define-and-execute-it-strategy",
                            "Define and execute IT Strategy",
                        ),
                    ],
                ),
                Category::new(
                    "portfolio-management",
                    "PORTFOLIO MANAGEMENT",
                    vec![
                        Process::new(
                            "evaluate-and-prioritize-investments",
                            "Evaluate and prioritize investments",
                        ),
                        Process::new(
                            "monitor-and-realign-portfolio",
                            "Monitor and realign portfolio",
                        ),
                        Process::new(
                            "monitor-capability-performance",
                            "Monitor capability performance",
                        ),
                    ],
                ),
            ],
        ),
        Domain::new(
            "govern-technology",
            "Govern technology",
            "Technology governance and risk management processes",
            vec![
                Category::new(
                    "cybersecurity-governance",
                    "CYBERSECURITY GOVERNANCE",
                    vec![
                        Process::new(
                            "define-and-implement-cyber-risk",
                            "Define and implement cyber risk",
                        ),
                        Process::new(
                            "define-cybersecurity-policies",
                            "Define cybersecurity policies",
                        ),
                        Process::new(
                            "manage-cybersecurity-supply-chain-risk",
                            "Manage cybersecurity supply chain risk",
                        ),
                        Process::new(
                            "oversee-cybersecurity-performance",
                            "Oversee cybersecurity performance",
                        ),
                    ],
                ),
                Category::new(
                    "it-risk-compliance",
                    "IT-RISK AND COMPLIANCE",
                    vec![
                        Process::new(
                            "maintain-compliance-register-and-regulation-surveillance",
                            "Maintain a compliance register and regulation surveillance",
                        ),
                        Process::new(
                            "define-manage-it-and-compliance-risks",
                            "Define & Manage IT and compliance risks",
                        ),
                        Process::new("setup-control-system-for-it", "Setup control system for IT"),
                        Process::new(
                            "ensure-sustainability-and-ethics-in-it",
                            "Ensure sustainability and ethics in IT",
                        ),
                    ],
                ),
                Category::new(
                    "data-governance",
                    "DATA GOVERNANCE",
                    vec![
                        Process::new(
                            "establish-and-maintain-data-catalog",
                            "Establish and maintain data catalog",
                        ),
                        Process::new(
                            "ensure-data-quality-and-integrity",
                            "Ensure data quality and integrity",
                        ),
                        Process::new(
                            "ensure-data-compliance-classification-and-risk-management",
                            "Ensure data compliance, classification and risk management",
                        ),
                    ],
                ),
            ],
        ),
        Domain::new(
            "manage-architecture",
            "Manage architecture",
            "Enterprise and technology architecture management",
            vec![
                Category::new(
                    "enterprise-architecture",
                    "ENTERPRISE ARCHITECTURE",
                    vec![
                        Process::new("define-architecture-vision", "Define architecture vision"),
                        Process::new("govern-architecture", "Govern architecture"),
                        Process::new("transform-architecture", "Transform architecture"),
                        Process::new("analyse-architecture", "Analyse architecture"),
                    ],
                ),
                Category::new(
                    "technology-strategy",
                    "TECHNOLOGY STRATEGY",
                    vec![
                        Process::new("define-technology-strategy", "Define technology strategy"),
                        Process::new("govern-technology", "Govern technology"),
                        Process::new("manage-technology-risk", "Manage technology risk"),
                        Process::new(
                            "foster-technology-innovation",
                            "Foster technology innovation",
                        ),
                    ],
                ),
            ],
        ),
        Domain::new(
            "manage-demand",
            "Manage demand",
            "Demand management and business relationship processes",
            vec![
                Category::new(
                    "business-relationship",
                    "BUSINESS RELATIONSHIP",
                    vec![
                        Process::new(
                            "maintain-relationship-and-communication",
                            "Maintain relationship and communication",
                        ),
                        Process::new(
                            "ensure-transparency-on-service-performance",
                            "Ensure transparency on service performance",
                        ),
                        Process::new(
                            "capture-and-integrate-continuous-feedback",
                            "Capture and integrate continuous feedback",
                        ),
                    ],
                ),
                Category::new(
                    "demand-management",
                    "DEMAND MANAGEMENT",
                    vec![
                        Process::new("gather-and-filter-demand", "Gather and filter demand"),
                        Process::new(
                            "qualify-feasibility-and-compliance",
                            "Qualify feasibility and compliance",
                        ),
                        Process::new(
                            "manage-demand-and-supply-capacity",
                            "Manage demand and supply capacity",
                        ),
                    ],
                ),
            ],
        ),
        Domain::new(
            "deliver-solutions",
            "Deliver solutions",
            "Solution delivery and engineering processes",
            vec![
                Category::new(
                    "projects-programs-delivery",
                    "PROJECTS & PROGRAMS DELIVERY",
                    vec![
                        Process::new("scope-projects-and-programs", "Scope projects and programs"),
                        Process::new(
                            "plan-and-coordinate-delivery-roadmap",
                            "Plan and coordinate delivery roadmap",
                        ),
                        Process::new(
                            "engage-and-align-stakeholders",
                            "Engage and align stakeholders",
                        ),
                        Process::new(
                            "monitor-progress-and-quality",
                            "Monitor progress and quality",
                        ),
                        Process::new(
                            "create-and-maintain-it-documentation",
                            "Create and maintain IT documentation",
                        ),
                        Process::new(
                            "ensure-security-by-design-principles",
                            "Ensure security-by-design principles",
                        ),
                    ],
                ),
                Category::new(
                    "solutions-engineering",
                    "SOLUTIONS ENGINEERING",
                    vec![
                        Process::new(
                            "manage-govern-it-solutions-lifecycle",
                            "Manage & govern IT solutions lifecycle",
                        ),
                        Process::new(
                            "align-with-business-requirements",
                            "Align with business requirements",
                        ),
                        Process::new(
                            "design-and-architect-solutions",
                            "Design and architect solutions",
                        ),
                        Process::new(
                            "build-and-configure-solutions",
                            "Build and configure solutions",
                        ),
                        Process::new(
                            "conduct-validation-and-testing",
                            "Conduct validation and testing",
                        ),
                        Process::new("prepare-solution-deployment", "Prepare solution deployment"),
                    ],
                ),
            ],
        ),
        Domain::new(
            "operate-solutions",
            "Operate solutions",
            "Solution operations and cybersecurity processes",
            vec![
                Category::new(
                    "solutions-operations",
                    "SOLUTIONS OPERATIONS",
                    vec![
                        Process::new(
                            "manage-solution-monitoring-alerting",
                            "Manage solution monitoring & alerting",
                        ),
                        Process::new("manage-events-incidents", "Manage events & incidents"),
                        Process::new(
                            "manage-changes-configurations",
                            "Manage changes & configurations",
                        ),
                        Process::new(
                            "manage-availability-and-capacity",
                            "Manage availability and capacity",
                        ),
                        Process::new("ensure-systems-resilience", "Ensure systems resilience"),
                        Process::new(
                            "provision-office-applications-and-devices",
                            "Provision office applications and devices",
                        ),
                    ],
                ),
                Category::new(
                    "cybersecurity-operations",
                    "CYBERSECURITY OPERATIONS",
                    vec![
                        Process::new(
                            "implement-manage-identity-access-controls",
                            "Implement & manage identity & access controls",
                        ),
                        Process::new(
                            "secure-data-at-rest-and-in-transit",
                            "Secure data at rest and in transit",
                        ),
                        Process::new(
                            "apply-endpoint-protection-and-system-hardening",
                            "Apply endpoint protection and system hardening",
                        ),
                        Process::new(
                            "manage-operational-cybersecurity-soc",
                            "Manage operational cybersecurity (SOC)",
                        ),
                    ],
                ),
            ],
        ),
        Domain::new(
            "support-users",
            "Support users",
            "User support and service improvement processes",
            vec![
                Category::new(
                    "support-improvement",
                    "SUPPORT & IMPROVEMENT",
                    vec![
                        Process::new(
                            "maintain-product-service-catalog",
                            "Maintain product & service catalog",
                        ),
                        Process::new(
                            "monitor-sla-and-service-performance",
                            "Monitor SLA and service performance",
                        ),
                        Process::new("manage-requests", "Manage requests"),
                        Process::new("manage-problems", "Manage problems"),
                        Process::new(
                            "deliver-user-documentation-training",
                            "Deliver user documentation & training",
                        ),
                        Process::new(
                            "improve-based-on-user-satisfaction",
                            "Improve based on user satisfaction",
                        ),
                    ],
                ),
            ],
        ),
        Domain::new(
            "steer-resources",
            "Steer Resources",
            "Resource management and organizational processes",
            vec![
                Category::new(
                    "it-finance-controlling",
                    "IT FINANCE & CONTROLLING",
                    vec![
                        Process::new("manage-budgets-and-invest", "Manage budgets and invest"),
                        Process::new("allocate-costs", "Allocate costs"),
                        Process::new(
                            "control-costs-and-performance",
                            "Control costs and performance",
                        ),
                        Process::new(
                            "perform-billing-and-reporting-to-customers",
                            "Perform billing and reporting to customers",
                        ),
                    ],
                ),
                Category::new(
                    "it-organization-hr",
                    "IT ORGANIZATION & HR",
                    vec![
                        Process::new(
                            "design-manage-organization-structure",
                            "Design & manage organization structure",
                        ),
                        Process::new("plan-strategic-workforce", "Plan strategic workforce"),
                        Process::new(
                            "manage-capacity-and-staffing",
                            "Manage capacity and staffing",
                        ),
                        Process::new(
                            "manage-trainings-and-knowledge",
                            "Manage trainings and knowledge",
                        ),
                        Process::new(
                            "lead-change-and-manage-communication",
                            "Lead change and manage communication",
                        ),
                    ],
                ),
                Category::new(
                    "it-asset-management",
                    "IT ASSET MANAGEMENT",
                    vec![
                        Process::new(
                            "manage-application-portfolio-apm",
                            "Manage application portfolio (APM)",
                        ),
                        Process::new("manage-software-assets-sam", "Manage software assets (SAM)"),
                        Process::new("manage-hardware-assets-ham", "Manage hardware assets (HAM)"),
                    ],
                ),
                Category::new(
                    "it-sourcing-procurement",
                    "IT SOURCING & PROCUREMENT",
                    vec![
                        Process::new("define-sourcing-strategy", "Define sourcing strategy"),
                        Process::new(
                            "select-supplier-and-manage-transition",
                            "Select supplier and manage transition",
                        ),
                        Process::new("manage-service-supply", "Manage service supply"),
                        Process::new(
                            "manage-vendor-relationships-and-contracts",
                            "Manage vendor relationships and contracts",
                        ),
                    ],
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_framework_has_expected_shape() {
        let framework = Framework::standard();
        assert_eq!(framework.domains().len(), 8);
        assert_eq!(framework.categories().count(), 18);
        assert_eq!(framework.process_count(), 74);
    }

    #[test]
    fn standard_framework_passes_validation() {
        let domains = Framework::standard().domains().to_vec();
        Framework::new(domains).expect("standard taxonomy is valid");
    }
}
