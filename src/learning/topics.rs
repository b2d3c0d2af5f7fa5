//! Topic detection and the background texts served when generated cultural
//! context is unusable. Every template names years, places and institutions
//! so it passes the same quality gate that generated text must pass.

use regex::Regex;
use std::sync::LazyLock;

use crate::learning::level::Level;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Taiwan,
    Climate,
    Technology,
    International,
    Sports,
    Politics,
    Economy,
    Health,
    Education,
    General,
}

/// First match wins, so narrower topics come first.
static TOPIC_RULES: LazyLock<Vec<(Topic, Regex)>> = LazyLock::new(|| {
    [
        (Topic::Taiwan, r"\b(?:taiwan(?:ese)?|taipei|cross-strait)\b"),
        (
            Topic::Climate,
            r"\b(?:climate|global warming|emissions?|carbon|cop\d{2}|paris agreement|renewables?|fossil fuels?)\b",
        ),
        (
            Topic::Technology,
            r"\b(?:artificial intelligence|ai|machine learning|chatbots?|openai|algorithms?)\b",
        ),
        (
            Topic::International,
            r"\b(?:ukraine|ukrainian|russia|russian|kremlin|kyiv|moscow|nato)\b",
        ),
        (
            Topic::Sports,
            r"\b(?:sports?|football|soccer|basketball|baseball|olympics?|tournament|world cup|championship|league|coach)\b",
        ),
        (
            Topic::Politics,
            r"\b(?:elections?|voters?|voting|parliament|congress|senate|president|prime minister|campaign|democrats?|republicans?)\b",
        ),
        (
            Topic::Economy,
            r"\b(?:economy|economic|inflation|interest rates?|stock markets?|gdp|recession|tariffs?|unemployment)\b",
        ),
        (
            Topic::Health,
            r"\b(?:health|hospitals?|disease|virus|vaccines?|pandemic|medical|patients?)\b",
        ),
        (
            Topic::Education,
            r"\b(?:schools?|universit(?:y|ies)|college|students?|teachers?|education)\b",
        ),
        (
            Topic::Technology,
            r"\b(?:technology|tech|software|smartphones?|internet|semiconductors?|chips?|cyber\w*)\b",
        ),
        (
            Topic::International,
            r"\b(?:united nations|diplomac(?:y|tic)|foreign minister|summit|treaty|sanctions|embassy)\b",
        ),
    ]
    .into_iter()
    .map(|(topic, pattern)| (topic, Regex::new(&format!("(?i){pattern}")).unwrap()))
    .collect()
});

impl Topic {
    pub fn detect(title: &str, content: &str) -> Topic {
        let text = format!("{title}\n{content}");
        TOPIC_RULES
            .iter()
            .find(|(_, pattern)| pattern.is_match(&text))
            .map(|(topic, _)| *topic)
            .unwrap_or(Topic::General)
    }

    pub fn label(self) -> &'static str {
        match self {
            Topic::Taiwan => "Taiwan and Cross-Strait Relations",
            Topic::Climate => "Climate Change and Environmental Policy",
            Topic::Technology => "Technology and Society",
            Topic::International => "International Relations and Security",
            Topic::Sports => "Sport and Society",
            Topic::Politics => "Politics and Democracy",
            Topic::Economy => "Economic Policy and Markets",
            Topic::Health => "Public Health",
            Topic::Education => "Education Systems",
            Topic::General => "Cultural Background and Context",
        }
    }

    pub fn background(self, level: Level) -> &'static str {
        use Level::*;
        match (self, level) {
            (Topic::Climate, Beginner) => "Nations first agreed to work together on climate change at the Rio Earth Summit in 1992. In 2015, almost every government signed the Paris Agreement. The goal is to keep global warming well below 2 degrees Celsius. Island nations like Fiji and the Maldives worry about rising seas. Students in Sweden and Germany started school strikes for the climate in 2018.",
            (Topic::Climate, Intermediate) => "International climate negotiations began with the UN Framework Convention on Climate Change, signed in Rio de Janeiro in 1992. The Kyoto Protocol of 1997 set binding targets for industrialised economies, but the United States never ratified it. The 2015 Paris Agreement changed the approach by asking each nation to publish its own emissions pledge. Developing economies such as India and Brazil argue that wealthy states, which emitted most historical carbon, should pay more for the transition. Annual COP summits now bring around 190 governments together to review progress.",
            (Topic::Climate, Advanced) => "Climate diplomacy has evolved from the top-down architecture of the 1997 Kyoto Protocol to the bottom-up model of the 2015 Paris Agreement, in which nationally determined contributions replace negotiated quotas. The principle of common but differentiated responsibilities remains contested: China is now the largest annual emitter, while the United States bears the greatest cumulative responsibility. Small island developing states have reframed the debate around loss and damage, securing a dedicated fund at COP27 in Egypt in 2022. Current pledges still put the planet on track for roughly 2.5 degrees of warming. The tension between economic development and decarbonisation therefore shapes almost every summit communique.",

            (Topic::Technology, Beginner) => "The first iPhone went on sale in the United States in 2007. Today, more than 60% of all people use the internet. Artificial intelligence tools like chatbots became popular after 2022. Some workers worry that computers will take their jobs. Schools in Finland and Japan teach children how to use technology safely.",
            (Topic::Technology, Intermediate) => "Modern consumer technology grew out of research funded by the US government, including ARPANET, the network that became the internet in the 1980s. Silicon Valley in California and Shenzhen in China are now the two biggest centres of hardware and software production. The European Union passed the General Data Protection Regulation in 2018 to give citizens more control over personal data. Artificial intelligence raised new questions after 2022, when chatbots reached hundreds of millions of users within months. Governments now debate how to encourage innovation while limiting misinformation and job losses.",
            (Topic::Technology, Advanced) => "Technological change has long provoked regulatory catch-up, from nineteenth-century railway legislation in Britain to the EU Artificial Intelligence Act adopted in 2024. The concentration of computing power in a handful of firms in the United States and China has turned semiconductors into an instrument of geopolitical leverage, as export controls introduced in 2022 illustrate. Scholars of technology policy distinguish precautionary regimes, which restrict deployment until risks are understood, from permissive regimes that intervene only after harm occurs. Labour economists remain divided on whether generative models will augment or displace knowledge workers. These debates echo earlier anxieties about automation during the industrial revolution.",

            (Topic::Politics, Beginner) => "In a democracy, citizens vote to choose their leaders. Women in New Zealand won the right to vote in 1893, before most other nations. The United States holds a presidential election every four years. In India, more than 600 million people voted in the 2019 general election. Elections let people change their government without violence.",
            (Topic::Politics, Intermediate) => "Representative democracy expanded rapidly after 1945, and again after the fall of the Berlin Wall in 1989. Systems still vary: the United Kingdom uses a parliamentary model in which the prime minister leads the largest party, while the United States separates the president from Congress. Coalition governments are common in Germany and the Netherlands because proportional voting rarely gives one party a majority. Voter turnout, polarisation and trust in institutions are watched closely by researchers. Debates about campaign finance and online disinformation have grown since 2016.",
            (Topic::Politics, Advanced) => "Political scientists increasingly describe a pattern of democratic backsliding, in which elected governments erode judicial independence and press freedom while preserving the formal ritual of elections. Hungary and Turkey are frequently cited examples, though scholars disagree on where legitimate majoritarian reform ends and institutional capture begins. The 2016 referendum in the United Kingdom and the 2021 assault on the US Capitol exposed how referendums and disputed results can strain constitutional norms. Comparative research suggests that strong parties and independent courts slow backsliding more effectively than constitutional text alone. The resulting debate connects electoral politics with questions of legitimacy and accountability.",

            (Topic::International, Beginner) => "The United Nations was created in 1945, after the Second World War. It has 193 member states today. Governments meet in New York to talk about peace and security. When wars start, the UN often sends help to people who must leave their homes. Russia and the United States are two of the five permanent members of the Security Council.",
            (Topic::International, Intermediate) => "The current international order took shape after 1945, when the United Nations and the Bretton Woods institutions were founded to prevent another global war. NATO, created in 1949, linked the security of North America and Western Europe during the Cold War. Since the full-scale Russian invasion of Ukraine in 2022, sanctions, energy policy and military aid have dominated European diplomacy. The growing economic influence of China, through projects such as the Belt and Road Initiative, has added a new axis of competition. Smaller states often try to balance these powers rather than choose sides.",
            (Topic::International, Advanced) => "Realist scholars read the war in Ukraine since 2022 as a consequence of NATO enlargement and great-power competition, whereas liberal institutionalists emphasise the violation of sovereignty norms codified in the UN Charter of 1945. Paralysis in the Security Council, where permanent members hold a veto, has pushed diplomacy toward coalitions of the willing and regional bodies such as the EU. Economic statecraft, including sanctions on central bank reserves and export controls, has become as consequential as conventional deterrence. Meanwhile, states in the so-called Global South, including India and Brazil, pursue strategic autonomy instead of alignment. These shifts suggest a more fragmented, multipolar order than the one that followed 1991.",

            (Topic::Taiwan, Beginner) => "Taiwan is an island about 180 kilometres from mainland China. Since 1949, Taiwan and China have had separate governments. Taiwan holds its own elections and has about 23 million people. China says Taiwan is part of its territory. Phones and cars all over the globe use computer chips made in Taiwan.",
            (Topic::Taiwan, Intermediate) => "The separation between Taiwan and mainland China dates to 1949, when the Nationalist government retreated to the island after losing the civil war. Taiwan became a multiparty democracy in the 1990s and held its first direct presidential election in 1996. Beijing regards the island as a breakaway province, while most governments maintain only unofficial relations with Taipei. The United States supplies defensive weapons under the Taiwan Relations Act of 1979. The semiconductor industry of Taiwan, led by TSMC, gives the dispute global economic weight.",
            (Topic::Taiwan, Advanced) => "The cross-strait relationship rests on deliberate ambiguity: the 1992 Consensus, the US policy of strategic ambiguity and the Taiwan Relations Act of 1979 all allow competing interpretations of sovereignty to coexist. Democratic consolidation in Taiwan since 1996 has strengthened a distinct civic identity, complicating the goal in Beijing of unification under a one country, two systems framework. Analysts debate whether military exercises around the island since 2022 signal coercion short of war or preparation for a blockade. The dominance of the island in advanced chip manufacturing makes any disruption a systemic risk for the world economy. Deterrence, economic interdependence and domestic politics therefore interact in unusually tight ways.",

            (Topic::Economy, Beginner) => "Inflation means prices go up over time. In 2022, prices rose quickly in the United States and the United Kingdom. Central banks raised interest rates to slow inflation. Higher rates make loans more expensive for families and businesses. Many workers asked for higher pay to keep up with costs.",
            (Topic::Economy, Intermediate) => "Modern economic policy is shaped by lessons from the Great Depression of the 1930s and the global financial crisis of 2008. After the pandemic, inflation in the United States reached 9.1% in June 2022, its highest level in four decades. Central banks such as the Federal Reserve and the European Central Bank responded with rapid interest rate rises. Supply chains, energy prices and labour shortages all contributed to the price increases. Economists still debate how much of the inflation was temporary.",
            (Topic::Economy, Advanced) => "The inflationary episode of 2021 to 2023 reopened debates that had seemed settled since the Volcker disinflation of the early 1980s in the United States. Monetary economists disagree about the relative weight of supply shocks, such as energy prices after the invasion of Ukraine, and demand stimulus from fiscal packages. Synchronised tightening by central banks raised concerns about sovereign debt sustainability in emerging markets, echoing the Latin American debt crisis of 1982. Distributional effects also matter, because inflation erodes real wages and savings unevenly across income groups. Whether central bank independence survives such political pressure remains an open question.",

            (Topic::Health, Beginner) => "The World Health Organization was founded in 1948. It helps nations fight diseases like malaria and measles. During the COVID-19 pandemic in 2020, many schools and shops closed. Scientists developed vaccines in less than one year. Doctors say clean water and good food keep people healthy.",
            (Topic::Health, Intermediate) => "Global health cooperation was formalised in 1948 with the creation of the World Health Organization. Smallpox was declared eradicated in 1980, a success that still guides vaccination campaigns. The COVID-19 pandemic, first identified in China in late 2019, tested health systems everywhere and revealed unequal access to vaccines. Nations with universal health coverage, such as the United Kingdom and Canada, faced pressures unlike those that rely on private insurance. Public trust in health advice became a political issue as well as a medical one.",
            (Topic::Health, Advanced) => "The COVID-19 pandemic exposed the limits of the International Health Regulations revised in 2005, particularly the reliance on timely, voluntary reporting by member states. Vaccine nationalism, in which wealthy economies pre-purchased supply, left many low-income nations waiting months for first doses despite the COVAX initiative. Health economists continue to measure excess mortality to compare national strategies, from elimination in New Zealand to mitigation in Sweden. Negotiations on a pandemic treaty at the WHO since 2021 reveal tension between sovereignty and collective preparedness. These debates link public health to trade, intellectual property and geopolitics.",

            (Topic::Education, Beginner) => "In the United States, most children go to school from age 5 to 18. Finland is famous for short school days and little homework. University students in England pay fees of up to 9,250 pounds a year. Online classes became common in 2020. Millions of students now learn English as a second language.",
            (Topic::Education, Intermediate) => "Public schooling became compulsory in most industrialised nations during the nineteenth century, beginning with Prussia. Today, international tests such as PISA, run by the OECD since 2000, compare how well fifteen-year-olds read and solve problems. Finland, Singapore and Japan often rank near the top, though their systems follow very distinct philosophies. In the United States, rising university tuition has made student debt a major political issue. The shift to remote learning in 2020 widened gaps between students with and without reliable internet access.",
            (Topic::Education, Advanced) => "Education policy sits at the intersection of equity and competitiveness: the PISA rankings published by the OECD every three years since 2000 have prompted reform waves from Germany to South Korea. Critics argue that league tables narrow curricula toward measurable skills while neglecting civic and creative purposes. The expansion of higher education has produced graduate surpluses in some labour markets, reviving debates about credential inflation. In the United States, affirmative action in admissions was curtailed by the Supreme Court in 2023, reshaping arguments about merit and diversity. These controversies reveal competing theories of what schools are for.",

            (Topic::Sports, Beginner) => "The modern Olympic Games started in Athens, Greece, in 1896. Football is the most popular sport on the planet. The FIFA World Cup happens every four years. In 2022, Argentina won the World Cup in Qatar. Sport brings fans together and teaches teamwork.",
            (Topic::Sports, Intermediate) => "Organised sport grew with industrial cities in the nineteenth century, when Britain codified football, rugby and tennis. The Olympic Games were revived in Athens in 1896 and became a stage for national prestige, especially during the Cold War. College sport in the United States is a business worth billions of dollars, and rule changes in 2021 now let student athletes earn money from their image. Hosting major tournaments, such as the 2022 World Cup in Qatar, often raises questions about cost and human rights. Fans, sponsors and broadcasters all shape how sport is played today.",
            (Topic::Sports, Advanced) => "Sport has become a vehicle of soft power, from boycotts of the Moscow Olympics in 1980 to investment by Gulf states in European football clubs, which critics describe as sportswashing. Governing bodies such as FIFA and the IOC operate as private associations with quasi-public influence, a status that complicates accountability after repeated corruption scandals. In the United States, the 2021 Supreme Court ruling in NCAA v. Alston weakened the amateurism model of college athletics. Economists question whether mega-events deliver lasting benefits to host cities. The commercialisation of athlete labour therefore raises questions about fairness, identity and public subsidy.",

            (Topic::General, Beginner) => "Newspapers began in Europe more than 400 years ago. The first daily newspaper in London started in 1702. Today, most people read news on their phones. Good reporters check facts before they write a story. Reading the news every day is a great way to learn English.",
            (Topic::General, Intermediate) => "Modern journalism developed alongside printing, and the first English-language daily, the Daily Courant, appeared in London in 1702. Wire services such as Reuters, founded in 1851, made it possible to share international news within hours. Since 2010, social media has changed how stories spread and how audiences judge reliability. Professional newsrooms respond with fact-checking units and clearer labelling of opinion. Knowing who reports a story, and why, is part of reading the news well.",
            (Topic::General, Advanced) => "News is never a neutral mirror of events; editorial selection, framing and sourcing determine which facts reach the public, a process media scholars have studied since the agenda-setting research of 1972 in the United States. The collapse of advertising revenue after 2008 hollowed out local newspapers, creating so-called news deserts across large regions. Platform algorithms now mediate attention, rewarding speed and emotional intensity over verification. Press freedom indexes record declining conditions in several democracies as well as authoritarian states. Reading critically therefore means asking how a story was produced as well as what it says.",
        }
    }
}
