//! Public landing page of the store-management platform.
//!
//! Headline texts, descriptions and the hero image carry `data-edit-id` so
//! the authoring tool can retarget them; the legal line in the footer is
//! marked `data-edit-disabled`.

use dioxus::prelude::*;

use crate::icons::{
    FaBriefcase, FaChartColumn, FaCheck, FaComments, FaDollarSign, FaFileLines, FaShieldHalved,
};
use crate::{Icon, LANDING_CSS};

const HERO_IMAGE: &str = "https://images.unsplash.com/photo-1704030964199-ab687b9214db";

#[component]
pub fn LandingPage() -> Element {
    rsx! {
        document::Stylesheet { href: LANDING_CSS }

        div {
            class: "landing",
            main {
                Hero {}
                Features {}
                Pricing {}
                CallToAction {}
            }
            Footer {}
        }
    }
}

#[component]
pub fn Hero() -> Element {
    rsx! {
        section {
            class: "hero",
            div {
                class: "hero-copy",
                h1 {
                    "data-edit-id": "hero-title",
                    "Transforme a gestão da sua "
                    span { class: "accent", "loja de móveis planejados" }
                }
                p {
                    "data-edit-id": "hero-subtitle",
                    "A plataforma completa que une CRM, gestão de projetos e finanças para impulsionar o sucesso do seu negócio."
                }
                div {
                    class: "hero-actions",
                    a { class: "button button--primary", href: "/login", "Experimente Grátis" }
                    a { class: "button button--outline", href: "/login", "Entrar" }
                }
            }
            div {
                class: "hero-frame",
                img {
                    "data-edit-id": "hero-image",
                    src: HERO_IMAGE,
                    alt: "Dashboard da plataforma Gestão Móveis mostrando gráficos e projetos",
                }
            }
        }
    }
}

#[component]
pub fn Features() -> Element {
    rsx! {
        section {
            class: "features",
            h2 { "data-edit-id": "features-title", "Tudo o que sua loja precisa" }
            div {
                class: "features-grid",
                FeatureCard {
                    index: 0,
                    title: "CRM e Vendas",
                    description: "Funil de vendas visual e histórico completo de interações com clientes.",
                    Icon { icon: FaBriefcase, width: 24, height: 24 }
                }
                FeatureCard {
                    index: 1,
                    title: "Orçamentos e Projetos",
                    description: "Gere orçamentos precisos com upload de arquivos XML do Promob.",
                    Icon { icon: FaFileLines, width: 24, height: 24 }
                }
                FeatureCard {
                    index: 2,
                    title: "Relatórios e Análises",
                    description: "Acompanhe vendas, performance e comissões com relatórios detalhados.",
                    Icon { icon: FaChartColumn, width: 24, height: 24 }
                }
                FeatureCard {
                    index: 3,
                    title: "Integração e Comunicação",
                    description: "Centralize mensagens de WhatsApp e Instagram para nunca perder um lead.",
                    Icon { icon: FaComments, width: 24, height: 24 }
                }
                FeatureCard {
                    index: 4,
                    title: "Gestão Financeira",
                    description: "Controle de caixa, contas a pagar/receber e fluxo financeiro.",
                    Icon { icon: FaDollarSign, width: 24, height: 24 }
                }
                FeatureCard {
                    index: 5,
                    title: "Segurança e Autenticação",
                    description: "Proteja seus dados com login seguro, criptografia e isolamento multi-tenant.",
                    Icon { icon: FaShieldHalved, width: 24, height: 24 }
                }
            }
        }
    }
}

#[component]
fn FeatureCard(index: usize, title: String, description: String, children: Element) -> Element {
    rsx! {
        div {
            class: "feature-card",
            div { class: "feature-icon", {children} }
            h3 { "data-edit-id": "feature-{index}-title", "{title}" }
            p { "data-edit-id": "feature-{index}-description", "{description}" }
        }
    }
}

#[derive(Clone, PartialEq)]
struct Plan {
    name: &'static str,
    /// Monthly price in reais; `None` for plans sold by contact.
    price: Option<&'static str>,
    features: &'static [&'static str],
    recommended: bool,
}

const PLANS: [Plan; 3] = [
    Plan {
        name: "Básico",
        price: Some("99"),
        features: &[
            "Gestão de Clientes (CRM)",
            "Até 5 Usuários",
            "Funil de Vendas",
            "Suporte por Email",
        ],
        recommended: false,
    },
    Plan {
        name: "Pro",
        price: Some("199"),
        features: &[
            "Tudo do plano Básico",
            "Até 20 Usuários",
            "Gestão de Projetos e Orçamentos",
            "Relatórios Avançados",
            "Suporte Prioritário por Chat",
        ],
        recommended: true,
    },
    Plan {
        name: "Enterprise",
        price: None,
        features: &[
            "Tudo do plano Pro",
            "Usuários Ilimitados",
            "Integrações Personalizadas",
            "Gerente de Contas Dedicado",
            "Segurança Avançada (SSO)",
        ],
        recommended: false,
    },
];

#[component]
pub fn Pricing() -> Element {
    rsx! {
        section {
            id: "pricing",
            class: "pricing",
            h2 { "data-edit-id": "pricing-title", "Planos para cada fase da sua loja" }
            div {
                class: "pricing-grid",
                for plan in PLANS {
                    PricingCard { key: "{plan.name}", plan }
                }
            }
        }
    }
}

#[component]
fn PricingCard(plan: Plan) -> Element {
    let slug = plan.name.to_lowercase();
    rsx! {
        div {
            class: if plan.recommended { "pricing-card pricing-card--recommended" } else { "pricing-card" },
            h3 { "{plan.name}" }
            div {
                class: "pricing-price",
                if let Some(price) = plan.price {
                    span { class: "pricing-amount", "R${price}" }
                    span { class: "pricing-period", "/mês" }
                } else {
                    span { class: "pricing-amount", "Contato" }
                }
            }
            ul {
                for (i, feature) in plan.features.iter().enumerate() {
                    li {
                        key: "{i}",
                        Icon { icon: FaCheck, width: 14, height: 14 }
                        span { "data-edit-id": "plan-{slug}-feature-{i}", "{feature}" }
                    }
                }
            }
            a {
                class: if plan.recommended { "button button--primary" } else { "button button--outline" },
                href: "/login",
                if plan.price.is_some() { "Assinar" } else { "Entrar em Contato" }
            }
        }
    }
}

#[component]
pub fn CallToAction() -> Element {
    rsx! {
        section {
            class: "cta",
            h2 { "data-edit-id": "cta-title", "Pronto para impulsionar suas vendas?" }
            p {
                "data-edit-id": "cta-subtitle",
                "Comece hoje mesmo a transformar a gestão da sua loja e veja seus resultados decolarem."
            }
            a { class: "button button--primary", href: "/login", "Experimente Grátis" }
        }
    }
}

#[component]
pub fn Footer() -> Element {
    rsx! {
        footer {
            class: "footer",
            div {
                class: "footer-brand",
                h3 { "data-edit-id": "footer-brand", "Gestão Móveis" }
                p {
                    "data-edit-id": "footer-tagline",
                    "A solução definitiva para a gestão de lojas de móveis planejados."
                }
            }
            nav {
                class: "footer-links",
                a { href: "#", "Sobre Nós" }
                a { href: "#", "Contato" }
                a { href: "#pricing", "Preços" }
            }
            p {
                class: "footer-legal",
                "data-edit-disabled": "true",
                "© 2025 Gestão Móveis. Todos os direitos reservados."
            }
        }
    }
}
