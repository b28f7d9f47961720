//! Prompt templates for the debate flow

use crate::debate::transcript::TurnMessage;
use crate::persona::entities::Persona;
use crate::session::entities::Message;

/// Separator between expert opinions in the judge prompt
pub const OPINION_SEPARATOR: &str = "\n\n---\n\n";

/// Templates for generating prompts at each stage
pub struct DebatePromptTemplate;

impl DebatePromptTemplate {
    /// Instruction that frames a persona for its turn
    pub fn turn_system(persona: &Persona, topic: &str) -> String {
        format!(
            r#"Sen bir {name} uzmanısın. Görevin, {description} bakış açısıyla tartışmaya katılmak ve konu hakkında doğru, bilimsel ya da akademik bilgiler sunmaktır.

KURALLAR:
1. Yalnızca kendi alanının perspektifinden konuş.
2. Kısa, net ve çarpıcı ol. En fazla 2-3 cümle.
3. Bir önceki konuşmacının argümanını doğrudan hedef al: çürüt, eleştir ya da zayıf noktasını göster.
4. Destek vereceksen bile körü körüne destekleme; mutlaka ek bir eleştiri veya farklı bir gerekçe ekle.
5. Sert ve iğneleyici olabilirsin, ama akademik kimliğini koru.
6. Her cevabın tartışma konusu hakkında bilgi veya olgu içermeli; laf kalabalığı yapma.
7. Her seferinde tartışmayı ileri taşıyacak yeni bir fikir, çelişki veya iddia getir. Kendini tekrar etme.
8. Rakibine adıyla seslen (örn. "Fizikçi, yanılıyorsun...").
9. Tartışma konusu: "{topic}"

Amacın: gerçek bir televizyon münazarasındaki gibi çatışmalı bir üslupla kendi disiplinini öne çıkarmak, ama bilgi ve gerçekleri sunmayı ihmal etmemek."#,
            name = persona.name(),
            description = persona.description(),
            topic = topic,
        )
    }

    /// Framing line for a prior turn
    pub fn previous_speaker(persona_name: &str, content: &str) -> String {
        format!("Önceki konuşmacı ({}): {}", persona_name, content)
    }

    /// Trailing instruction that invites the active persona to speak
    pub fn turn_invitation(persona_name: &str) -> String {
        format!(
            "Şimdi sıra sende. {} olarak tartışmaya katıl.",
            persona_name
        )
    }

    /// Request history for a turn: the persona instruction followed by one
    /// framing line per prior assistant message, in transcript order. The
    /// invitation is sent separately as the streamed message.
    pub fn turn_history(persona: &Persona, topic: &str, transcript: &[TurnMessage]) -> Vec<Message> {
        let mut history = vec![Message::user(Self::turn_system(persona, topic))];
        history.extend(transcript.iter().filter(|m| m.is_assistant()).map(|m| {
            Message::user(Self::previous_speaker(
                m.persona_name.as_deref().unwrap_or_default(),
                &m.content,
            ))
        }));
        history
    }

    /// Expert turns formatted for the judge, or `None` if nobody has spoken
    pub fn expert_opinions(transcript: &[TurnMessage]) -> Option<String> {
        let opinions: Vec<String> = transcript
            .iter()
            .filter(|m| m.is_assistant())
            .filter_map(|m| {
                m.persona_name
                    .as_deref()
                    .map(|name| format!("{} Uzmanı:\n{}", name, m.content))
            })
            .collect();
        let joined = opinions.join(OPINION_SEPARATOR);
        if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        }
    }

    /// Single instruction asking for a terse ruling
    pub fn judge_prompt(topic: &str, opinions: &str) -> String {
        format!(
            r#"Sen tarafsız bir hakemsin. Aşağıdaki uzmanların "{topic}" konusundaki görüşlerini analiz et ve NET bir karar ver.

UZMAN GÖRÜŞLERİ:
{opinions}

HAKEM KARARI:
Kısa ve net cevap ver. En fazla 3-4 cümle. Formatın şöyle olsun:

"[Hangi uzmanlara katıldığın] argümanları daha güçlü. [Kısa gerekçe]. SONUÇ: [Net cevap - Evet/Hayır/Belirsiz]"

Örnek: "Çevre ve Kimya uzmanlarının argümanları daha güçlü. CFC gazlarının ozon tabakasını incelttiği bilimsel olarak kanıtlanmış. SONUÇ: Evet, ozon tabakası delik.""#,
        )
    }

    /// Request for a short academic description of a field
    pub fn describe_persona(name: &str) -> String {
        format!(
            r#""{name}" alanı için açıklama yaz.
Açıklama:
- Türkçe olacak
- 2-3 cümle uzunluğunda olacak
- Akademik ve teknik üslup kullanılacak
- Bu alanın hangi konuları incelediğini, hangi yöntemleri kullandığını ve nasıl katkı sağladığını net biçimde açıklayacak
- Metaforik veya kişiselleştirilmiş ifadeler olmayacak
Çıktıyı yalnızca açıklama metni olarak ver."#,
        )
    }
}
