// Prompt templates for the five analysis artifacts.
// Templates are data: builders only substitute placeholders. `{deck_text}` is always
// substituted last so deck content is embedded verbatim and never re-interpolated.

/// Structured outline. Replace `{deck_text}`.
pub const STRUCTURE_PROMPT_TEMPLATE: &str = r#"You are an expert startup advisor. Analyze this pitch deck content and create a professional, investor-ready structured outline.

**INSTRUCTIONS:**
- Reorganize the content into clear sections that follow investor expectations
- Use the actual information provided, don't make up details
- If information is missing for a section, indicate "Not specified in current deck"
- Be specific and actionable in your recommendations
- Format using markdown headers and bullet points

**REQUIRED STRUCTURE:**

## 📊 RESTRUCTURED PITCH DECK

### 1. 🎯 PROBLEM
- What specific pain point are you solving?
- Who experiences this problem?
- How urgent or expensive is this problem?

### 2. 💡 SOLUTION
- Your unique approach to solving the problem
- Key features and capabilities
- Why your solution is different or better

### 3. 🌍 MARKET OPPORTUNITY
- Total Addressable Market (TAM)
- Target customer segments
- Market trends supporting your solution

### 4. 📈 TRACTION & VALIDATION
- Key metrics and milestones achieved
- Customer testimonials or case studies
- Revenue and user growth data

### 5. 💰 BUSINESS MODEL
- How you make money
- Pricing strategy
- Revenue streams

### 6. ⚔️ COMPETITIVE ADVANTAGE
- Key competitors and how you're different
- Your unfair advantages
- Barriers to entry you've built

### 7. 👥 TEAM
- Founder backgrounds and expertise
- Key team members and advisors
- Why this team can execute

### 8. 📊 FINANCIAL PROJECTIONS
- Revenue projections (3-5 years)
- Key financial metrics
- Path to profitability

### 9. 💸 FUNDING ASK
- How much you're raising
- Use of funds breakdown
- Expected milestones with this funding

**PITCH DECK CONTENT:**
{deck_text}

**OUTPUT FORMAT:**
- Use clear, professional language
- Include specific numbers and metrics where mentioned
- Make it investor-focused and compelling
- Use bullet points for readability"#;

/// Two-minute pitch script. Replace `{deck_text}`.
pub const SCRIPT_PROMPT_TEMPLATE: &str = r#"Create a compelling 2-minute founder pitch script based on this deck content. You are an expert pitch coach helping a startup founder.

**SCRIPT REQUIREMENTS:**

**Structure & Timing:**
- **Hook (0-15 sec)**: Grab attention with a compelling opening
- **Problem (15-30 sec)**: Paint the pain point vividly
- **Solution (30-60 sec)**: Your unique approach and key benefits
- **Traction (60-90 sec)**: Proof points and momentum
- **Ask (90-120 sec)**: Clear funding request and vision

**Writing Style:**
- Conversational and confident tone
- Include specific metrics and numbers from the deck
- Use storytelling elements
- End with a memorable call to action
- Add timing and emphasis cues

**FORMAT:**

# 🎤 YOUR 2-MINUTE PITCH SCRIPT

## Opening Hook (0-15 seconds)
[Your compelling opening that grabs attention...]

## Problem Statement (15-30 seconds)
[Paint the problem vividly with real impact...]

## Solution Demo (30-60 seconds)
[Show your solution and key differentiators...]

## Traction Proof (60-90 seconds)
[Share your momentum and validation...]

## The Ask (90-120 seconds)
[Clear funding request and exciting vision...]

---
**💡 Delivery Tips:**
- Maintain eye contact with investors
- Use confident body language
- Practice timing with a stopwatch
- End with enthusiasm and clear next steps

**DECK CONTENT:**
{deck_text}

Use only the information provided in the deck content. If key information is missing, mark it as "[Add specific detail about X]" in the script."#;

/// Slide design recommendations. Replace `{deck_text}`.
pub const DESIGN_PROMPT_TEMPLATE: &str = r#"You are a professional presentation designer. Provide specific, actionable slide design recommendations for this pitch deck based on current investor presentation best practices.

**ANALYSIS REQUIRED:**

## 🎨 DESIGN ANALYSIS & RECOMMENDATIONS

### 1. 📐 VISUAL HIERARCHY & TYPOGRAPHY
**Font Recommendations:**
- Header fonts: [Specific font suggestions]
- Body text fonts: [Readable options]
- Font sizes for different slide types

**Layout Principles:**
- Slide composition guidelines
- White space usage
- Visual flow improvements

### 2. 🎨 COLOR PALETTE & BRANDING
**Professional Color Schemes:**
- Primary brand colors (2-3 max)
- Supporting colors for charts and data
- High contrast for readability

**Industry Standards:**
- Colors that work in investor presentations
- Accessibility considerations
- Print-friendly options

### 3. 📊 DATA VISUALIZATION
**Chart Improvements:**
- Best chart types for different data
- Color coding strategies
- Making numbers more impactful

**Visual Metaphors:**
- Icons and illustrations
- Infographic opportunities

### 4. 🖼️ IMAGERY & GRAPHICS
**Professional Standards:**
- High-quality imagery guidelines
- Avoiding cliché stock photos
- Brand-consistent visual style

### 5. 📱 MODERN TRENDS
**Current Best Practices:**
- Minimalist vs detailed approaches
- Interactive elements for digital presentation
- Mobile-friendly considerations

### 6. 🎯 SLIDE-SPECIFIC RECOMMENDATIONS
Based on the content provided, give specific suggestions for:
- Title and cover slides
- Problem and solution slides
- Market size visualization
- Traction and metrics slides
- Team introduction slides
- Financial projection slides

**DECK CONTENT:**
{deck_text}

**OUTPUT REQUIREMENTS:**
- Provide specific, actionable recommendations
- Include rationale for each suggestion
- Focus on investor presentation standards
- Consider both digital and print formats"#;

/// Benchmark gap analysis.
/// Replace: {template_name}, {missing_elements}, then {deck_text}.
pub const BENCHMARK_PROMPT_TEMPLATE: &str = r#"You are a seasoned venture capital advisor. Conduct a comprehensive benchmark analysis of this pitch deck against {template_name} investment standards.

**ANALYSIS FRAMEWORK:**

## 📊 BENCHMARK ANALYSIS REPORT

**Template Standard:** {template_name}
**Missing Critical Elements:** {missing_elements}

### 1. ✅ STRENGTHS ANALYSIS
**What's Working Well:**
- Content areas that meet or exceed VC standards
- Compelling messaging and positioning
- Strong data points and metrics

### 2. ⚠️ IMPROVEMENT OPPORTUNITIES
**Content Gaps:**
- Missing critical information for investors
- Weak or unclear sections that need strengthening
- Opportunities for more compelling messaging

**Structural Issues:**
- Flow and organization improvements
- Information hierarchy fixes
- Slide sequence optimization

### 3. 🎯 CRITICAL MISSING ELEMENTS
For each missing element, provide:
- Why it's essential for the {template_name} standard
- What specific information should be included
- Where it should be positioned in the deck
- Impact on investor decision-making

### 4. 📈 CONTENT DEPTH ASSESSMENT
**Information Sufficiency:**
- Are key points adequately detailed?
- What additional data or metrics would strengthen the case?
- Balance between detail and clarity

### 5. 💰 INVESTOR APPEAL EVALUATION
**Compelling Narrative:**
- Story strength and emotional appeal
- Logical flow and persuasiveness
- Memorable differentiators and hooks

**Risk Assessment:**
- How well potential risks are addressed
- Credibility factors present
- Trust-building elements

### 6. 🚀 PRIORITY ACTION ITEMS
**High-Impact Quick Fixes:**
1. [Most critical improvements needed]
2. [Content additions with biggest ROI]
3. [Structural changes for better flow]

**Strategic Enhancements:**
- Advanced positioning strategies
- Competitive differentiation opportunities
- Investor-specific customization

### 7. 📊 SCORING vs {template_name} STANDARD
**Overall Assessment:**
- Investment readiness score (1-10 with explanation)
- Category-specific ratings
- Comparison to successful decks in this template

**DECK CONTENT TO ANALYZE:**
{deck_text}

**REQUIREMENTS:**
- Be specific and actionable in all recommendations
- Use actual content from the deck (don't invent details)
- Focus on {template_name} specific requirements
- Provide clear rationale for each suggestion
- Prioritize recommendations by impact and effort"#;

/// Shown in place of the gap list when the checker found nothing missing.
pub const NO_GAPS_LABEL: &str = "None identified - Excellent coverage!";

/// One-page executive summary. Replace `{deck_text}`.
pub const ONE_PAGER_PROMPT_TEMPLATE: &str = r#"Create a concise, professional one-page executive summary from this pitch deck content. It is for busy investors who need key information at a glance.

**EXECUTIVE SUMMARY FORMAT:**

# [COMPANY NAME]
**One-Line Pitch:** *[Compelling tagline describing what you do]*

## 🎯 THE OPPORTUNITY
**Problem:** [Brief description of the pain point]
**Market Size:** [TAM/SAM figures if available]
**Timing:** [Why now is the right time]

## 💡 OUR SOLUTION
**Product:** [What you've built and core functionality]
**Key Differentiator:** [What makes you uniquely positioned]
**Value Proposition:** [Primary benefits to customers]

## 📈 TRACTION & VALIDATION
**Metrics:** [Key performance indicators and growth]
**Customers:** [Notable clients, user base, or pilot programs]
**Revenue:** [Financial performance highlights]

## 💰 BUSINESS MODEL
**Revenue Streams:** [How you generate money]
**Unit Economics:** [Key financial metrics like CAC, LTV]
**Scalability:** [Growth potential and expansion opportunities]

## 👥 FOUNDING TEAM
**Leadership:** [Brief backgrounds of key founders]
**Expertise:** [Relevant experience and track record]
**Advisors:** [Notable advisors or board members if mentioned]

## 💸 INVESTMENT OPPORTUNITY
**Raising:** [Amount seeking to raise]
**Use of Capital:** [Primary allocation of funds]
**Key Milestones:** [What you'll achieve with this funding]
**Next Round:** [Timeline and expected progress]

---
**Contact:** [Founder name] • [Email if provided]

**REQUIREMENTS:**
- Maximum 400 words total
- Use bullet points and clear formatting
- Include specific numbers and metrics from the deck
- Professional but engaging tone
- Scannable for busy investors
- Only use information actually provided in the deck

**DECK CONTENT:**
{deck_text}

**NOTE:** If critical information is missing from the deck, write [To be added] rather than inventing details."#;

pub fn build_structure_prompt(deck_text: &str) -> String {
    STRUCTURE_PROMPT_TEMPLATE.replace("{deck_text}", deck_text)
}

pub fn build_script_prompt(deck_text: &str) -> String {
    SCRIPT_PROMPT_TEMPLATE.replace("{deck_text}", deck_text)
}

pub fn build_design_prompt(deck_text: &str) -> String {
    DESIGN_PROMPT_TEMPLATE.replace("{deck_text}", deck_text)
}

pub fn build_benchmark_prompt(deck_text: &str, gaps: &[String], template_name: &str) -> String {
    let missing = if gaps.is_empty() {
        NO_GAPS_LABEL.to_string()
    } else {
        gaps.join(", ")
    };
    BENCHMARK_PROMPT_TEMPLATE
        .replace("{missing_elements}", &missing)
        .replace("{template_name}", template_name)
        .replace("{deck_text}", deck_text)
}

pub fn build_one_pager_prompt(deck_text: &str) -> String {
    ONE_PAGER_PROMPT_TEMPLATE.replace("{deck_text}", deck_text)
}
